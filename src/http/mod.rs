//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, request ID)
//!     → /favicon.ico, static dir      → file response
//!     → {api prefix}/**   → proxy.rs  → API process → streamed back verbatim
//!     → anything else     → page.rs
//!                             → context.rs (what the tree may see of the request)
//!                             → tree::AppTreeFactory (store, router, projection)
//!                             → document.rs (shell + hydration state)
//!                             → HTML response
//! ```

pub mod context;
pub mod document;
pub mod page;
pub mod proxy;
pub mod request;
pub mod server;

pub use context::RequestContext;
pub use document::DocumentShell;
pub use page::PageRenderer;
pub use proxy::{ApiProxy, ProxyError};
pub use request::{UuidRequestId, X_REQUEST_ID, request_id};
pub use server::{HttpServer, ServerError, ServerState};
