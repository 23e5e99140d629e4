//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! SIGINT → signals::shutdown_on_ctrl_c → Shutdown::trigger
//!     → server stops accepting → in-flight requests drain → exit
//! ```

pub mod signals;

pub use signals::{Shutdown, shutdown_on_ctrl_c};
