//! Route lookup and navigation.
//!
//! # Responsibilities
//! - Resolve a path against the route table
//! - Publish the resolved route to the store (drives route-dependent rendering)
//! - Navigate: push history then re-parse (browser) or do nothing (server)
//!
//! # Design Decisions
//! - Parsing never fails; unmatched paths resolve to `Route::NotFound`
//! - Navigation strategy is injected (`Navigator`), not patched onto the router
//! - A server response can only reflect one path, so server navigation is inert

use std::sync::Arc;

use crate::routing::history::History;
use crate::routing::matcher::normalize_path;
use crate::routing::routes::{Route, RouteTable};
use crate::store::{Action, Store};

/// How a router reacts to `go`.
pub trait Navigator: Send + Sync {
    fn go(&self, router: &Router, path: &str);

    /// True when navigation writes browser history.
    fn records_history(&self) -> bool;
}

/// Server-side navigator: one request yields one response.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn go(&self, _router: &Router, path: &str) {
        tracing::trace!(path = %path, "Navigation ignored on server");
    }

    fn records_history(&self) -> bool {
        false
    }
}

/// Browser navigator: pushes an entry carrying the current snapshot, then
/// re-parses the new path.
pub struct HistoryNavigator {
    history: Arc<dyn History>,
}

impl HistoryNavigator {
    pub fn new(history: Arc<dyn History>) -> Self {
        Self { history }
    }
}

impl Navigator for HistoryNavigator {
    fn go(&self, router: &Router, path: &str) {
        self.history.push(&router.store().state(), path);
        router.parse(path);
    }

    fn records_history(&self) -> bool {
        true
    }
}

/// Modifier state of a link click.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    pub shift_key: bool,
    pub ctrl_key: bool,
    pub meta_key: bool,
}

impl ClickEvent {
    fn has_modifier(&self) -> bool {
        self.shift_key || self.ctrl_key || self.meta_key
    }
}

pub struct Router {
    table: RouteTable,
    store: Store,
    navigator: Box<dyn Navigator>,
}

impl Router {
    pub fn new(table: RouteTable, store: Store, navigator: Box<dyn Navigator>) -> Self {
        Self { table, store, navigator }
    }

    /// Router with the default route table and inert navigation.
    pub fn server(store: Store) -> Self {
        Self::new(RouteTable::default(), store, Box::new(NoopNavigator))
    }

    /// Router with the default route table navigating through `history`.
    pub fn browser(store: Store, history: Arc<dyn History>) -> Self {
        Self::new(
            RouteTable::default(),
            store,
            Box::new(HistoryNavigator::new(history)),
        )
    }

    /// Resolve `path` and publish the result to the store.
    pub fn parse(&self, path: &str) -> Route {
        let path = normalize_path(path);
        let route = self.table.resolve(&path);
        tracing::debug!(path = %path, route = ?route, "Route parsed");
        self.store.dispatch(Action::RouteMatched {
            route: route.clone(),
            path,
        });
        route
    }

    /// Navigate to `path`.
    pub fn go(&self, path: &str) {
        self.navigator.go(self, path);
    }

    /// Click handler for an in-app link.
    ///
    /// A plain click navigates and returns `true` (the caller must prevent the
    /// default action). With shift/ctrl/meta held the browser keeps its own
    /// behaviour (new tab/window) and the handler returns `false`.
    pub fn link_handler(self: &Arc<Self>, path: impl Into<String>) -> impl Fn(&ClickEvent) -> bool + Send + Sync + 'static {
        let router = Arc::downgrade(self);
        let path = path.into();
        move |event: &ClickEvent| {
            if event.has_modifier() {
                return false;
            }
            if let Some(router) = router.upgrade() {
                router.go(&path);
            }
            true
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn records_history(&self) -> bool {
        self.navigator.records_history()
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.table.len())
            .field("records_history", &self.records_history())
            .finish()
    }
}
