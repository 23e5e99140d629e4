//! Application tree: the mounted UI for one page session or one request.
//!
//! # Data Flow
//! ```text
//! factory.rs (bootstrap)
//!     → Store + Router + ApiClient
//!     → projection.rs (snapshot → TreeProps)
//!     → mount App, subscribe to the store
//!     → router.parse(initial path)
//!
//! store.dispatch(..) → subscription → projection.rs → TreeProps replaced
//! render_to_string() → ui (App over TreeProps) → HTML
//! ```
//!
//! # Design Decisions
//! - Mirrored props are only written by projection, never by components
//! - Store subscription and history pop handler are RAII handles owned by the
//!   tree; dropping the tree (or calling `teardown`) releases both

pub mod factory;
pub mod projection;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::api::ApiClient;
use crate::routing::{History, PopRegistration, Router};
use crate::store::{AppState, Store, Subscription};
use crate::ui::{Component, RenderContext, RenderError};

pub use factory::{AppTreeFactory, BootstrapContext};
pub use projection::TreeProps;

/// Where the tree is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    Server,
    Browser,
}

/// Rendering options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeOptions {
    /// Validate every component's props before rendering it.
    pub validate_props: bool,
}

pub struct AppTree {
    mode: ExecutionMode,
    options: TreeOptions,
    api: ApiClient,
    store: Store,
    router: Arc<Router>,
    props: Arc<RwLock<TreeProps>>,
    projections: Arc<AtomicU64>,
    root: Option<Box<dyn Component + Send + Sync>>,
    store_subscription: Option<Subscription>,
    pop_registration: Option<PopRegistration>,
}

impl AppTree {
    /// An unmounted tree with nothing projected yet.
    pub fn new(mode: ExecutionMode, api: ApiClient, store: Store, router: Arc<Router>) -> Self {
        Self {
            mode,
            options: TreeOptions::default(),
            api,
            store,
            router,
            props: Arc::new(RwLock::new(TreeProps::default())),
            projections: Arc::new(AtomicU64::new(0)),
            root: None,
            store_subscription: None,
            pop_registration: None,
        }
    }

    pub fn set_options(&mut self, options: TreeOptions) {
        self.options = options;
    }

    /// Replace the mirrored props with the store's current snapshot.
    pub fn project(&self) {
        projection::project(&self.store, &self.props, &self.projections);
    }

    pub fn mount<C>(&mut self, root: C)
    where
        C: Component + Send + Sync + 'static,
    {
        tracing::trace!(component = root.name(), "Mounting root component");
        self.root = Some(Box::new(root));
    }

    /// Re-project on every store change. Replaces any previous subscription.
    pub fn subscribe_to_store(&mut self) {
        let props = self.props.clone();
        let projections = self.projections.clone();
        self.store_subscription = Some(self.store.subscribe(move |store| {
            projection::project(store, &props, &projections);
        }));
    }

    /// Stop re-projecting on store changes.
    pub fn unsubscribe_from_store(&mut self) {
        self.store_subscription = None;
    }

    /// Re-parse the history location on back/forward. Replaces any previous
    /// registration, so a tree never holds more than one handler.
    pub fn attach_pop_handler(&mut self, history: Arc<dyn History>) {
        self.pop_registration = None;
        let router = Arc::downgrade(&self.router);
        self.pop_registration = Some(PopRegistration::register(
            history,
            Arc::new(move |path: &str| {
                if let Some(router) = router.upgrade() {
                    router.parse(path);
                }
            }),
        ));
    }

    /// Release the store subscription and the history handler.
    pub fn teardown(&mut self) {
        let had_subscription = self.store_subscription.take().is_some();
        let had_pop_handler = self.pop_registration.take().is_some();
        tracing::trace!(
            mode = ?self.mode,
            had_subscription,
            had_pop_handler,
            "Application tree torn down"
        );
    }

    /// Render the mounted root to an HTML fragment.
    pub fn render_to_string(&self) -> Result<String, RenderError> {
        let root = self.root.as_ref().ok_or(RenderError::NotMounted)?;
        let props = self.props();
        let cx = RenderContext::new(&props, self.options.validate_props);
        Ok(cx.render(root.as_ref())?.render_to_string())
    }

    /// Navigate through the router.
    pub fn go(&self, path: &str) {
        self.router.go(path);
    }

    /// Copy of the mirrored props.
    pub fn props(&self) -> TreeProps {
        self.props
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The store's current snapshot.
    pub fn state(&self) -> Arc<AppState> {
        self.store.state()
    }

    /// How many projections have run since the tree was created.
    pub fn projection_count(&self) -> u64 {
        self.projections.load(Ordering::Relaxed)
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn options(&self) -> TreeOptions {
        self.options
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn is_mounted(&self) -> bool {
        self.root.is_some()
    }

    pub fn is_subscribed(&self) -> bool {
        self.store_subscription.is_some()
    }

    pub fn has_pop_handler(&self) -> bool {
        self.pop_registration.is_some()
    }
}

impl std::fmt::Debug for AppTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppTree")
            .field("mode", &self.mode)
            .field("options", &self.options)
            .field("mounted", &self.is_mounted())
            .field("subscribed", &self.is_subscribed())
            .field("pop_handler", &self.has_pop_handler())
            .field("projections", &self.projection_count())
            .finish()
    }
}
