//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router: static files, API proxy, page rendering
//! - Wire up middleware (request ID, tracing, timeout, compression)
//! - Serve on a bound listener until shutdown is signalled

use axum::{
    Router,
    routing::{any, get},
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::document::DocumentShell;
use crate::http::page::{PageRenderer, render_page};
use crate::http::proxy::{ApiProxy, ProxyError, proxy_handler};
use crate::http::request::UuidRequestId;
use crate::tree::AppTreeFactory;

/// Errors while assembling the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid API endpoint: {0}")]
    Endpoints(#[from] url::ParseError),
    #[error(transparent)]
    Proxy(#[from] ProxyError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// State injected into handlers.
#[derive(Debug, Clone)]
pub struct ServerState {
    pub proxy: Arc<ApiProxy>,
    pub pages: Arc<PageRenderer>,
}

/// HTTP server for the universal application.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: AppConfig) -> Result<Self, ServerError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .build()?;
        let trees = AppTreeFactory::new(http, config.api_endpoints()?);

        let state = ServerState {
            proxy: Arc::new(ApiProxy::new(&config)?),
            pages: Arc::new(PageRenderer::new(trees, DocumentShell::from_config(&config))),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Static files win; anything the static directory doesn't have falls
    /// through to the API proxy or the page renderer.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: ServerState) -> Router {
        let prefix = config.api_prefix();

        let dynamic = Router::new()
            .route(prefix, any(proxy_handler))
            .route(&format!("{prefix}/"), any(proxy_handler))
            .route(&format!("{prefix}/{{*rest}}"), any(proxy_handler))
            .fallback(get(render_page).layer(CompressionLayer::new()))
            .with_state(state);

        let static_dir = Path::new(&config.assets.static_dir);
        let files = ServeDir::new(static_dir)
            .call_fallback_on_method_not_allowed(true)
            .fallback(dynamic);

        Router::new()
            .route_service("/favicon.ico", ServeFile::new(static_dir.join(&config.assets.favicon)))
            .fallback_service(files)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// Run until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The assembled router, for serving on a custom listener.
    pub fn into_router(self) -> Router {
        self.router
    }
}
