//! Configuration loading from disk and the environment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::{AppConfig, Environment};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Values that take precedence over the config file (CLI flags / env vars).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub port: Option<u16>,
    pub api_port: Option<u16>,
    pub environment: Option<Environment>,
    pub static_dir: Option<String>,
}

impl Overrides {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.server.port = Some(port);
        }
        if let Some(api_port) = self.api_port {
            config.api.port = api_port;
        }
        if let Some(environment) = self.environment {
            config.environment = environment;
        }
        if let Some(dir) = &self.static_dir {
            config.assets.static_dir = dir.clone();
        }
    }
}

/// Parse a TOML config file without validating it.
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// File (or defaults) + overrides, validated as a whole.
pub fn resolve_config(path: Option<&Path>, overrides: &Overrides) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => AppConfig::default(),
    };
    overrides.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_resolve_config_from_file() {
        let file = write_config(
            r#"
            [server]
            port = 8000

            [document]
            title = "Blog"
            "#,
        );

        let config = resolve_config(Some(file.path()), &Overrides::default()).unwrap();
        assert_eq!(config.server.port, Some(8000));
        assert_eq!(config.document.title, "Blog");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = resolve_config(Some(Path::new("/definitely/not/here.toml")), &Overrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let file = write_config("[server\nport = ");
        assert!(matches!(
            resolve_config(Some(file.path()), &Overrides::default()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file = write_config(
            r#"
            environment = "development"
            [server]
            port = 8000
            [api]
            port = 3030
            "#,
        );

        let overrides = Overrides {
            port: Some(9000),
            api_port: Some(4000),
            environment: Some(Environment::Production),
            static_dir: None,
        };
        let config = resolve_config(Some(file.path()), &overrides).unwrap();
        assert_eq!(config.server.port, Some(9000));
        assert_eq!(config.api.port, 4000);
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn test_validation_runs_after_overrides() {
        let overrides = Overrides {
            port: Some(3030),
            ..Overrides::default()
        };
        let err = resolve_config(None, &overrides).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));
        assert!(err.to_string().starts_with("validation failed: "));
    }
}
