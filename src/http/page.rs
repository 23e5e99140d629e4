//! Server-side page rendering.
//!
//! # Responsibilities
//! - Build a fresh application tree for every request
//! - Load the data the matched route shows before rendering
//! - Render it to markup and wrap it in the document shell
//! - Map render failures to a plain 500
//!
//! # Design Decisions
//! - A failed data load still renders; the error is part of the hydrated state
//! - The tree is dropped (unsubscribed) before the response is sent

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
};
use std::time::Instant;

use crate::http::context::RequestContext;
use crate::http::document::DocumentShell;
use crate::http::request::request_id;
use crate::http::server::ServerState;
use crate::observability::metrics;
use crate::routing::Route;
use crate::store::actions::load_posts;
use crate::tree::{AppTree, AppTreeFactory, BootstrapContext};
use crate::ui::RenderError;

/// Renders complete HTML documents for inbound requests.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    trees: AppTreeFactory,
    shell: DocumentShell,
}

impl PageRenderer {
    pub fn new(trees: AppTreeFactory, shell: DocumentShell) -> Self {
        Self { trees, shell }
    }

    /// Render the document for one request.
    pub async fn render(&self, request: RequestContext) -> Result<String, RenderError> {
        let mut tree = self.trees.create(BootstrapContext::server(request));
        prefetch(&tree).await;

        let state = tree.state();
        let markup = tree.render_to_string();
        tree.teardown();

        self.shell.render(&markup?, &state)
    }
}

/// Load what the current route displays. Failures are recorded in the store.
async fn prefetch(tree: &AppTree) {
    let route = tree.state().navigation.route.clone();
    if let Some(Route::Posts | Route::Post { .. }) = route {
        // load_posts dispatches PostsFailed itself; nothing more to do here.
        let _ = load_posts(tree.api(), tree.store()).await;
    }
}

/// Fallback handler: every non-API, non-static GET.
pub async fn render_page(State(state): State<ServerState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let (parts, _body) = request.into_parts();
    let request_id = request_id(&parts.headers).to_string();
    let context = RequestContext::from_parts(&parts);
    let path = context.path.clone();

    match state.pages.render(context).await {
        Ok(html) => {
            tracing::debug!(request_id = %request_id, path = %path, "Page rendered");
            metrics::record_request("page", 200, start_time);
            Html(html).into_response()
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, path = %path, error = %e, "Render failed");
            metrics::record_request("page", 500, start_time);
            (StatusCode::INTERNAL_SERVER_ERROR, "Render failed").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    /// Renderer whose API upstream refuses connections.
    async fn renderer() -> PageRenderer {
        let closed = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mut config = AppConfig::default();
        config.api.host = "127.0.0.1".into();
        config.api.port = closed.local_addr().unwrap().port();
        drop(closed);

        PageRenderer::new(
            AppTreeFactory::new(reqwest::Client::new(), config.api_endpoints().unwrap()),
            DocumentShell::from_config(&config),
        )
    }

    #[tokio::test]
    async fn test_render_embeds_route_state() {
        let html = renderer().await.render(RequestContext::new("/about")).await.unwrap();
        assert!(html.contains("<h1>About</h1>"));
        assert!(html.contains(r#""navigation":{"route":{"name":"about"},"path":"/about"}"#));
    }

    #[tokio::test]
    async fn test_failed_data_load_still_renders() {
        let html = renderer().await.render(RequestContext::new("/posts")).await.unwrap();
        assert!(html.contains("<h1>Posts</h1>"));
        assert!(html.contains(r#""loading":false"#));
        assert!(html.contains(r#""error":"API request failed"#));
    }

    #[tokio::test]
    async fn test_unknown_path_renders_not_found_page() {
        let html = renderer().await.render(RequestContext::new("/no/such/page")).await.unwrap();
        assert!(html.contains("Page not found"));
        assert!(html.contains(r#""route":{"name":"notFound"}"#));
    }

    #[tokio::test]
    async fn test_sequential_requests_are_independent() {
        let pages = renderer().await;
        let first = pages.render(RequestContext::new("/about")).await.unwrap();
        let second = pages.render(RequestContext::new("/")).await.unwrap();

        assert!(first.contains("<h1>About</h1>"));
        assert!(!second.contains("<h1>About</h1>"));
        assert!(second.contains("<h1>Home</h1>"));
    }
}
