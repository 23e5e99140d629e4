//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, or defaults)
//!     → Overrides (CLI flags / PORT, APIPORT, APP_ENV)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → shared via Arc with request handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - The server port has no default; startup refuses to bind without one
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ConfigError, Overrides, read_config, resolve_config};
pub use schema::{
    ApiConfig, AppConfig, AssetsConfig, DocumentConfig, Environment, ObservabilityConfig,
    ServerConfig, TimeoutConfig,
};
pub use validation::{ValidationError, validate_config};
