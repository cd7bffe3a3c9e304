//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RelayConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load the file when one is given, otherwise start from defaults.
///
/// Validation is left to the caller so command-line overrides can be applied
/// first; see [`finalize`].
pub fn load_or_default(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        }
        None => Ok(RelayConfig::default()),
    }
}

/// Validate a configuration after all overrides have been applied.
pub fn finalize(config: RelayConfig) -> Result<RelayConfig, ConfigError> {
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
    fn test_load_valid_file() {
        let file = write_config(
            r#"
            [facade]
            secondary_url = "http://messages.internal:5002/messages"

            [retries]
            max_attempts = 5
            "#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.retries.max_attempts, 5);
        assert_eq!(config.facade.secondary_url, "http://messages.internal:5002/messages");
    }

    #[test]
    fn test_load_reports_validation_errors() {
        let file = write_config(
            r#"
            [retries]
            max_attempts = 0
            read_max_attempts = 0
            "#,
        );

        match load_config(file.path()) {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let file = write_config("[retries\nmax_attempts = ");
        assert!(matches!(load_config(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_default_without_path_then_finalize() {
        let mut config = load_or_default(None).unwrap();
        config.retries.max_attempts = 0;

        let err = finalize(config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: retries.max_attempts must be at least 1"
        );
    }
}
