//! TCP listener binding.
//!
//! # Responsibilities
//! - Resolve the configured host and port to a socket address
//! - Refuse to bind when no port is configured

use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::config::ServerConfig;

/// Error type for listener operations.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// No port configured (flag, `PORT` or config file).
    #[error("no port specified")]
    MissingPort,
    /// Host and port do not form a socket address.
    #[error("invalid bind address '{addr}': {source}")]
    Address {
        addr: String,
        source: std::net::AddrParseError,
    },
    /// Failed to bind to address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
}

/// Socket address for `config`.
pub fn bind_address(config: &ServerConfig) -> Result<SocketAddr, ListenerError> {
    let port = config.port.ok_or(ListenerError::MissingPort)?;
    let addr = if config.host.contains(':') {
        format!("[{}]:{}", config.host, port)
    } else {
        format!("{}:{}", config.host, port)
    };
    addr.parse().map_err(|source| ListenerError::Address { addr, source })
}

/// Bind a listener for `config`.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, ListenerError> {
    let addr = bind_address(config)?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ListenerError::Bind { addr, source })?;

    tracing::info!(address = %addr, "Listener bound");
    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(host: &str, port: Option<u16>) -> ServerConfig {
        ServerConfig {
            host: host.to_string(),
            port,
            ..ServerConfig::default()
        }
    }

    #[test]
    fn test_missing_port() {
        assert!(matches!(bind_address(&server("0.0.0.0", None)), Err(ListenerError::MissingPort)));
    }

    #[test]
    fn test_ipv6_host() {
        let addr = bind_address(&server("::1", Some(8000))).unwrap();
        assert_eq!(addr.to_string(), "[::1]:8000");
    }

    #[test]
    fn test_hostname_is_rejected() {
        assert!(matches!(
            bind_address(&server("localhost", Some(8000))),
            Err(ListenerError::Address { .. })
        ));
    }

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let listener = bind(&server("127.0.0.1", Some(0))).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }
}
