//! Universal application server.
//!
//! Renders the application tree to HTML on the server, embeds the resulting
//! state for the browser to resume from, serves static assets, and proxies
//! API calls to a separate process.

pub mod api;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;
pub mod store;
pub mod tree;
pub mod ui;

pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::Store;
pub use tree::{AppTree, AppTreeFactory, BootstrapContext};
