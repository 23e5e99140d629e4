//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! path (request path or history location)
//!     → matcher.rs (normalize, match pattern segments)
//!     → routes.rs (first matching pattern → Route, else NotFound)
//!     → router.rs (dispatch RouteMatched to the store)
//!
//! Browser navigation:
//!     router.go(path) → history.rs push(snapshot, path) → router.parse(path)
//!     back/forward    → pop handler → router.parse(current_path)
//! ```
//!
//! # Design Decisions
//! - Route table built once, immutable at runtime
//! - First match wins
//! - History is injected, so the same router code runs on server and client

pub mod history;
pub mod matcher;
pub mod router;
pub mod routes;

pub use history::{History, HistoryEntry, MemoryHistory, PopRegistration};
pub use router::{ClickEvent, HistoryNavigator, Navigator, NoopNavigator, Router};
pub use routes::{Route, RouteTable};
