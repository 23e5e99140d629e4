//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ServerConfig (host, port)
//!     → listener.rs (resolve & bind)
//!     → Hand off to HTTP layer
//! ```

pub mod listener;

pub use listener::{ListenerError, bind};
