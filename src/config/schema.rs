//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::ApiEndpoints;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Which asset-loading paths to use.
    pub environment: Environment,

    /// Listener settings.
    pub server: ServerConfig,

    /// API upstream and proxy settings.
    pub api: ApiConfig,

    /// Static files and the client bundle.
    pub assets: AssetsConfig,

    /// HTML document shell.
    pub document: DocumentConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Execution environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment '{}'", other)),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Name used in startup logs.
    pub name: String,

    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// Port to listen on. No default: without one the server does not start.
    pub port: Option<u16>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "universal-app".to_string(),
            host: "0.0.0.0".to_string(),
            port: None,
        }
    }
}

/// API upstream configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Host of the API process.
    pub host: String,

    /// Port of the API process.
    pub port: u16,

    /// Path prefix proxied to the API (e.g., "/api").
    pub prefix: String,

    /// Remove the prefix before forwarding (`/api/widgets` → `/widgets`).
    pub strip_prefix: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3030,
            prefix: "/api".to_string(),
            strip_prefix: true,
        }
    }
}

/// Static asset configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory served before any dynamic handling.
    pub static_dir: String,

    /// Favicon file.
    pub favicon: String,

    /// Path of the client bootstrap bundle.
    pub client_script: String,

    /// Origin of the development asset server (used outside production).
    pub dev_server: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            static_dir: "static".to_string(),
            favicon: "favicon.ico".to_string(),
            client_script: "/dist/client.js".to_string(),
            dev_server: "//localhost:8080".to_string(),
        }
    }
}

/// HTML document configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// `<title>` of every page.
    pub title: String,

    /// Extra stylesheet URLs linked in `<head>`.
    pub stylesheets: Vec<String>,

    /// Extra script URLs loaded in `<head>`.
    pub scripts: Vec<String>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: "Universal App".to_string(),
            stylesheets: vec![
                "https://cdnjs.cloudflare.com/ajax/libs/materialize/0.97.0/css/materialize.min.css".to_string(),
                "https://fonts.googleapis.com/icon?family=Material+Icons".to_string(),
            ],
            scripts: vec![
                "https://code.jquery.com/jquery-2.1.1.min.js".to_string(),
                "https://cdnjs.cloudflare.com/ajax/libs/materialize/0.97.0/js/materialize.min.js".to_string(),
            ],
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

impl AppConfig {
    /// API prefix without a trailing slash (`/api`).
    pub fn api_prefix(&self) -> &str {
        self.api.prefix.trim_end_matches('/')
    }

    /// URL of the client bundle for the current environment.
    pub fn client_script_url(&self) -> String {
        match self.environment {
            Environment::Production => self.assets.client_script.clone(),
            Environment::Development => format!("{}{}", self.assets.dev_server, self.assets.client_script),
        }
    }

    /// API endpoints for server and browser execution.
    pub fn api_endpoints(&self) -> Result<ApiEndpoints, url::ParseError> {
        let upstream = Url::parse(&format!("http://{}:{}", self.api.host, self.api.port))?;
        let public_host = match self.server.host.as_str() {
            "0.0.0.0" | "::" => "localhost",
            host => host,
        };
        let public = Url::parse(&format!(
            "http://{}:{}{}",
            public_host,
            self.server.port.unwrap_or(80),
            self.api_prefix()
        ))?;
        Ok(ApiEndpoints::new(upstream, public))
    }
}
