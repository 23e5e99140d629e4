//! Backend API access.
//!
//! The API lives in a separate process. Server-side rendering talks to it
//! directly; the browser reaches it through the `/api` proxy.

pub mod client;

pub use client::{ApiClient, ApiEndpoints, ApiError};
