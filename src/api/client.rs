//! HTTP client for the backend API.

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use url::Url;

use crate::http::context::RequestContext;

/// Error type for API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid API path '{path}': {source}")]
    Url {
        path: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API returned status {status} for {url}: {body}")]
    Status { status: u16, url: Url, body: String },
    #[error("failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Where API calls go in each execution mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    /// Direct address of the API process, used when rendering on the server.
    pub upstream: Url,
    /// Public API prefix on this server, used from the browser.
    pub public: Url,
}

impl ApiEndpoints {
    /// Both URLs are normalized to end with `/` so relative joins append.
    pub fn new(mut upstream: Url, mut public: Url) -> Self {
        for url in [&mut upstream, &mut public] {
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
        }
        Self { upstream, public }
    }
}

/// API client bound to one execution context.
///
/// On the server it targets the upstream directly and replays the inbound
/// request's credentials; in the browser it goes through the public prefix.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
    forwarded: HeaderMap,
    server_side: bool,
}

impl ApiClient {
    pub fn new(client: reqwest::Client, endpoints: &ApiEndpoints, request: Option<&RequestContext>) -> Self {
        match request {
            Some(ctx) => Self {
                client,
                base_url: endpoints.upstream.clone(),
                forwarded: ctx.headers.clone(),
                server_side: true,
            },
            None => Self {
                client,
                base_url: endpoints.public.clone(),
                forwarded: HeaderMap::new(),
                server_side: false,
            },
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// True when bound to an inbound request (server rendering).
    pub fn is_server_side(&self) -> bool {
        self.server_side
    }

    /// Resolve an API path (`posts`, `/posts/1`) against the base URL.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| ApiError::Url {
                path: path.to_string(),
                source,
            })
    }

    /// GET `path`, replaying forwarded credentials, and decode the JSON body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path)?;
        let resp = self
            .client
            .get(url.clone())
            .headers(self.forwarded.clone())
            .send()
            .await?;
        Self::decode(url, resp).await
    }

    async fn decode<T: DeserializeOwned>(url: Url, resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
                body: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> ApiEndpoints {
        ApiEndpoints::new(
            Url::parse("http://127.0.0.1:3030").unwrap(),
            Url::parse("http://localhost:8000/api").unwrap(),
        )
    }

    #[test]
    fn test_endpoints_end_with_slash() {
        let e = endpoints();
        assert_eq!(e.upstream.as_str(), "http://127.0.0.1:3030/");
        assert_eq!(e.public.as_str(), "http://localhost:8000/api/");
    }

    #[test]
    fn test_server_client_targets_upstream_with_credentials() {
        let mut ctx = RequestContext::new("/posts");
        ctx.headers.insert("cookie", "session=1".parse().unwrap());

        let client = ApiClient::new(reqwest::Client::new(), &endpoints(), Some(&ctx));
        assert_eq!(client.url("/posts/2").unwrap().as_str(), "http://127.0.0.1:3030/posts/2");
        assert!(client.is_server_side());
    }

    #[test]
    fn test_browser_client_targets_public_prefix() {
        let client = ApiClient::new(reqwest::Client::new(), &endpoints(), None);
        assert_eq!(client.url("posts").unwrap().as_str(), "http://localhost:8000/api/posts");
        assert!(!client.is_server_side());
    }
}
