//! Inbound request context handed to the application tree on the server.

use axum::http::{HeaderMap, HeaderName, Method, request::Parts, header};

use crate::http::request::X_REQUEST_ID;

/// Headers that carry the caller's identity (and the correlation id) to the
/// API upstream.
fn forwarded_headers() -> [HeaderName; 4] {
    [
        header::COOKIE,
        header::AUTHORIZATION,
        header::ACCEPT_LANGUAGE,
        X_REQUEST_ID.clone(),
    ]
}

/// The parts of an inbound request the application cares about.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    /// Credentials and correlation headers forwarded on API calls.
    pub headers: HeaderMap,
}

impl RequestContext {
    /// Context for a bare GET of `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn from_parts(parts: &Parts) -> Self {
        let mut headers = HeaderMap::new();
        for name in forwarded_headers() {
            for value in parts.headers.get_all(&name) {
                headers.append(name.clone(), value.clone());
            }
        }

        Self {
            method: parts.method.clone(),
            path: parts.uri.path().to_string(),
            query: parts.uri.query().map(str::to_string),
            headers,
        }
    }

    /// Request id assigned by the request-id layer, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.headers.get(&X_REQUEST_ID).and_then(|v| v.to_str().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[test]
    fn test_from_parts_keeps_only_forwarded_headers() {
        let (parts, _) = Request::builder()
            .uri("http://example.com/posts/1?draft=true")
            .header("Cookie", "session=abc")
            .header("Authorization", "Bearer t")
            .header("x-request-id", "req-1")
            .header("User-Agent", "test")
            .body(())
            .unwrap()
            .into_parts();

        let ctx = RequestContext::from_parts(&parts);
        assert_eq!(ctx.path, "/posts/1");
        assert_eq!(ctx.query.as_deref(), Some("draft=true"));
        assert_eq!(ctx.headers.get("cookie").unwrap(), "session=abc");
        assert_eq!(ctx.headers.get("authorization").unwrap(), "Bearer t");
        assert_eq!(ctx.request_id(), Some("req-1"));
        assert!(ctx.headers.get("user-agent").is_none());
    }
}
