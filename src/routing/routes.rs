//! Application routes and the table that resolves paths to them.

use serde::{Deserialize, Serialize};

use crate::routing::matcher::{PathParams, PathPattern};

/// Every page the application can show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "camelCase")]
pub enum Route {
    Home,
    Posts,
    Post { id: u64 },
    About,
    NotFound,
}

type Resolver = fn(&PathParams) -> Option<Route>;

/// Ordered list of patterns. First match wins.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<(PathPattern, Resolver)>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Append a pattern; `{name}` segments capture.
    pub fn route(mut self, pattern: &str, resolver: Resolver) -> Self {
        self.entries.push((PathPattern::new(pattern), resolver));
        self
    }

    /// Resolve a path. Unmatched paths, and matches whose parameters do not
    /// parse, resolve to [`Route::NotFound`].
    pub fn resolve(&self, path: &str) -> Route {
        self.entries
            .iter()
            .find_map(|(pattern, resolver)| pattern.matches(path).and_then(|p| resolver(&p)))
            .unwrap_or(Route::NotFound)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RouteTable {
    /// The application's pages.
    fn default() -> Self {
        Self::new()
            .route("/", |_| Some(Route::Home))
            .route("/posts", |_| Some(Route::Posts))
            .route("/posts/{id}", |p| p.get("id")?.parse().ok().map(|id| Route::Post { id }))
            .route("/about", |_| Some(Route::About))
    }
}
