//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid)
//! - Check the API prefix is a usable mount point
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - A missing server port is NOT a validation error; startup reports it

use std::net::SocketAddr;

use crate::config::schema::AppConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("server.port must not be 0")]
    ZeroServerPort,
    #[error("api.port must not be 0")]
    ZeroApiPort,
    #[error("api.prefix '{0}' must start with '/' and not be '/'")]
    InvalidApiPrefix(String),
    #[error("timeouts.request_secs must be greater than 0")]
    ZeroRequestTimeout,
    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
    #[error("api upstream points back at this server on port {0}; the proxy would loop")]
    ProxyLoop(u16),
}

/// Check every semantic rule and report all violations.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.port == Some(0) {
        errors.push(ValidationError::ZeroServerPort);
    }
    if config.api.port == 0 {
        errors.push(ValidationError::ZeroApiPort);
    }

    let prefix = config.api_prefix();
    if !prefix.starts_with('/') || prefix.is_empty() {
        errors.push(ValidationError::InvalidApiPrefix(config.api.prefix.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.api.port != 0 && config.server.port == Some(config.api.port) && is_local(&config.api.host) {
        errors.push(ValidationError::ProxyLoop(config.api.port));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_local(host: &str) -> bool {
    matches!(host, "localhost" | "127.0.0.1" | "::1" | "0.0.0.0")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&AppConfig::default()), Ok(()));
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = AppConfig::default();
        config.server.port = Some(0);
        config.api.port = 0;
        config.api.prefix = "api".into();
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::ZeroServerPort,
                ValidationError::ZeroApiPort,
                ValidationError::InvalidApiPrefix("api".into()),
                ValidationError::ZeroRequestTimeout,
            ]
        );
    }

    #[test]
    fn test_root_prefix_rejected() {
        let mut config = AppConfig::default();
        config.api.prefix = "/".into();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::InvalidApiPrefix("/".into())])
        );
    }

    #[test]
    fn test_proxy_loop_detected() {
        let mut config = AppConfig::default();
        config.server.port = Some(3030);
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::ProxyLoop(3030)])
        );
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = AppConfig::default();
        config.observability.metrics_address = "nonsense".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
