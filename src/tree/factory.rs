//! Bootstrap of a mounted application tree, on the server or in the browser.

use std::sync::Arc;

use crate::api::{ApiClient, ApiEndpoints};
use crate::http::context::RequestContext;
use crate::routing::{History, Router};
use crate::store::{AppState, Store};
use crate::tree::{AppTree, ExecutionMode, TreeOptions};
use crate::ui::App;

/// Where a tree is being started.
pub enum BootstrapContext {
    /// Rendering one inbound request.
    Server { request: RequestContext },
    /// Running in a page; optionally resuming a hydrated snapshot.
    Browser {
        history: Arc<dyn History>,
        prior_state: Option<AppState>,
    },
}

impl BootstrapContext {
    pub fn server(request: RequestContext) -> Self {
        Self::Server { request }
    }

    pub fn browser(history: Arc<dyn History>, prior_state: Option<AppState>) -> Self {
        Self::Browser { history, prior_state }
    }

    pub fn request(&self) -> Option<&RequestContext> {
        match self {
            Self::Server { request } => Some(request),
            Self::Browser { .. } => None,
        }
    }
}

/// Builds mounted trees. Holds only what is shared across trees: the HTTP
/// connection pool and the API endpoints.
#[derive(Debug, Clone)]
pub struct AppTreeFactory {
    http: reqwest::Client,
    endpoints: ApiEndpoints,
}

impl AppTreeFactory {
    pub fn new(http: reqwest::Client, endpoints: ApiEndpoints) -> Self {
        Self { http, endpoints }
    }

    /// Compose store, router and API client into a mounted tree, then parse
    /// the initial path.
    pub fn create(&self, context: BootstrapContext) -> AppTree {
        let api = ApiClient::new(self.http.clone(), &self.endpoints, context.request());

        let (mut tree, history, initial_path) = match context {
            BootstrapContext::Server { request } => {
                // Fresh store per request; nothing leaks between responses.
                let store = Store::new(None);
                let router = Arc::new(Router::server(store.clone()));
                let mut tree = AppTree::new(ExecutionMode::Server, api, store, router);
                tree.set_options(TreeOptions { validate_props: true });
                (tree, None, request.path)
            }
            BootstrapContext::Browser { history, prior_state } => {
                let store = Store::new(prior_state);
                let router = Arc::new(Router::browser(store.clone(), history.clone()));
                let tree = AppTree::new(ExecutionMode::Browser, api, store, router);
                let path = history.current_path();
                (tree, Some(history), path)
            }
        };

        if let Some(history) = history {
            tree.attach_pop_handler(history);
        }

        tree.project();
        tree.mount(App);
        tree.subscribe_to_store();

        tracing::debug!(mode = ?tree.mode(), path = %initial_path, "Application tree mounted");
        tree.router().parse(&initial_path);
        tree
    }
}
