//! Forwarding of API requests to the upstream process.
//!
//! # Responsibilities
//! - Rewrite the request URI to the upstream authority
//! - Optionally strip the mount prefix (`/api/widgets` → `/widgets`)
//! - Forward method, headers and body unchanged; stream the response back
//!
//! # Design Decisions
//! - One shared hyper client per server, not per request
//! - No retries; a transport failure is a 502
//! - Request body is streamed, never buffered

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, Uri, Version, uri::{Authority, PathAndQuery, Scheme}},
    response::{IntoResponse, Response},
};
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use std::str::FromStr;
use std::time::Instant;

use crate::config::AppConfig;
use crate::http::request::request_id;
use crate::http::server::ServerState;
use crate::observability::metrics;

/// Error type for building the upstream request.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("invalid upstream authority '{0}'")]
    Authority(String),
    #[error("failed to build upstream URI: {0}")]
    Uri(#[from] axum::http::Error),
}

/// Forwards requests under the API prefix to the API process.
#[derive(Debug, Clone)]
pub struct ApiProxy {
    client: Client<HttpConnector, Body>,
    upstream: Authority,
    prefix: String,
    strip_prefix: bool,
}

impl ApiProxy {
    pub fn new(config: &AppConfig) -> Result<Self, ProxyError> {
        let authority = format!("{}:{}", config.api.host, config.api.port);
        let upstream = Authority::from_str(&authority).map_err(|_| ProxyError::Authority(authority))?;

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Ok(Self {
            client,
            upstream,
            prefix: config.api_prefix().to_string(),
            strip_prefix: config.api.strip_prefix,
        })
    }

    pub fn upstream(&self) -> &Authority {
        &self.upstream
    }

    /// Upstream URI for an inbound URI.
    pub fn upstream_uri(&self, uri: &Uri) -> Result<Uri, ProxyError> {
        let path = uri.path();
        let path = if self.strip_prefix {
            match path.strip_prefix(self.prefix.as_str()) {
                Some("") => "/",
                Some(rest) if rest.starts_with('/') => rest,
                _ => path,
            }
        } else {
            path
        };

        let path_and_query = match uri.query() {
            Some(q) => format!("{}?{}", path, q),
            None => path.to_string(),
        };

        Ok(Uri::builder()
            .scheme(Scheme::HTTP)
            .authority(self.upstream.clone())
            .path_and_query(PathAndQuery::from_str(&path_and_query).map_err(axum::http::Error::from)?)
            .build()?)
    }

    /// Forward one request and return the upstream response as-is.
    pub async fn forward(&self, request: Request<Body>) -> Response {
        let start_time = Instant::now();
        let request_id = request_id(request.headers()).to_string();
        let method = request.method().clone();

        let (mut parts, body) = request.into_parts();
        let uri = match self.upstream_uri(&parts.uri) {
            Ok(uri) => uri,
            Err(e) => {
                tracing::warn!(request_id = %request_id, uri = %parts.uri, error = %e, "Cannot map request to upstream");
                metrics::record_request("proxy", 400, start_time);
                return (StatusCode::BAD_REQUEST, "Invalid API path").into_response();
            }
        };

        tracing::debug!(
            request_id = %request_id,
            method = %method,
            upstream = %uri,
            "Proxying request"
        );

        parts.uri = uri;
        // The upstream connection is plain HTTP/1.1 regardless of the client side.
        parts.version = Version::HTTP_11;

        match self.client.request(Request::from_parts(parts, body)).await {
            Ok(response) => {
                metrics::record_request("proxy", response.status().as_u16(), start_time);
                let (parts, body) = response.into_parts();
                Response::from_parts(parts, Body::new(body))
            }
            Err(e) => {
                tracing::error!(request_id = %request_id, upstream = %self.upstream, error = %e, "Upstream error");
                metrics::record_request("proxy", 502, start_time);
                (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
            }
        }
    }
}

/// Handler for everything under the API prefix.
pub async fn proxy_handler(State(state): State<ServerState>, request: Request<Body>) -> Response {
    state.proxy.forward(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proxy(strip: bool) -> ApiProxy {
        let mut config = AppConfig::default();
        config.api.host = "127.0.0.1".into();
        config.api.port = 3030;
        config.api.strip_prefix = strip;
        ApiProxy::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_upstream_uri_strips_prefix() {
        let p = proxy(true);
        let uri: Uri = "/api/widgets?page=2".parse().unwrap();
        assert_eq!(p.upstream_uri(&uri).unwrap().to_string(), "http://127.0.0.1:3030/widgets?page=2");

        let uri: Uri = "/api".parse().unwrap();
        assert_eq!(p.upstream_uri(&uri).unwrap().to_string(), "http://127.0.0.1:3030/");

        let uri: Uri = "/api/".parse().unwrap();
        assert_eq!(p.upstream_uri(&uri).unwrap().to_string(), "http://127.0.0.1:3030/");

        // Only whole segments are stripped.
        let uri: Uri = "/apiary".parse().unwrap();
        assert_eq!(p.upstream_uri(&uri).unwrap().to_string(), "http://127.0.0.1:3030/apiary");
    }

    #[tokio::test]
    async fn test_upstream_uri_keeps_prefix() {
        let p = proxy(false);
        let uri: Uri = "/api/widgets".parse().unwrap();
        assert_eq!(p.upstream_uri(&uri).unwrap().to_string(), "http://127.0.0.1:3030/api/widgets");
    }

    #[test]
    fn test_invalid_upstream_authority() {
        let mut config = AppConfig::default();
        config.api.host = "bad host".into();
        assert!(matches!(ApiProxy::new(&config), Err(ProxyError::Authority(_))));
    }
}
