//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (attempts >= 1, timeouts > 0, ports valid)
//! - Check addresses and URLs parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: invalid URL '{value}': {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be at least {min}")]
    TooSmall { field: &'static str, min: u64 },

    #[error(
        "facade.request_timeout_secs ({actual_ms}ms) must exceed the retry schedule ({required_ms}ms)"
    )]
    RequestTimeoutTooShort { actual_ms: u64, required_ms: u64 },
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "store.bind_address", &config.store.bind_address);
    check_address(&mut errors, "facade.bind_address", &config.facade.bind_address);
    check_address(&mut errors, "secondary.bind_address", &config.secondary.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if config.facade.store_host.trim().is_empty() {
        errors.push(ValidationError::Empty { field: "facade.store_host" });
    }

    check_min(&mut errors, "facade.store_port", config.facade.store_port as u64, 1);
    check_min(&mut errors, "store.worker_threads", config.store.worker_threads as u64, 1);
    check_min(&mut errors, "facade.call_timeout_ms", config.facade.call_timeout_ms, 1);
    check_min(
        &mut errors,
        "facade.request_timeout_secs",
        config.facade.request_timeout_secs,
        1,
    );
    check_min(&mut errors, "retries.max_attempts", config.retries.max_attempts as u64, 1);
    check_min(
        &mut errors,
        "retries.read_max_attempts",
        config.retries.read_max_attempts as u64,
        1,
    );

    check_request_timeout(&mut errors, config);

    match Url::parse(&config.facade.secondary_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::InvalidUrl {
            field: "facade.secondary_url",
            value: config.facade.secondary_url.clone(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidUrl {
            field: "facade.secondary_url",
            value: config.facade.secondary_url.clone(),
            reason: e.to_string(),
        }),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

/// The whole-request timeout must outlast the longest retry schedule, so
/// backend failures reach the client as a 502 from the facade itself.
fn check_request_timeout(errors: &mut Vec<ValidationError>, config: &RelayConfig) {
    let attempts = u64::from(config.retries.max_attempts.max(config.retries.read_max_attempts));
    let required_ms = attempts
        .saturating_mul(config.facade.call_timeout_ms)
        .saturating_add(attempts.saturating_sub(1).saturating_mul(config.retries.delay_ms));
    let actual_ms = config.facade.request_timeout_secs.saturating_mul(1000);

    if actual_ms <= required_ms {
        errors.push(ValidationError::RequestTimeoutTooShort {
            actual_ms,
            required_ms,
        });
    }
}

fn check_min(errors: &mut Vec<ValidationError>, field: &'static str, value: u64, min: u64) {
    if value < min {
        errors.push(ValidationError::TooSmall { field, min });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&RelayConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = RelayConfig::default();
        config.retries.max_attempts = 0;
        config.facade.call_timeout_ms = 0;
        config.facade.secondary_url = "not a url".into();
        config.store.bind_address = "nowhere".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::TooSmall {
            field: "retries.max_attempts",
            min: 1
        }));
        assert!(errors.contains(&ValidationError::InvalidAddress {
            field: "store.bind_address",
            value: "nowhere".into()
        }));
    }

    #[test]
    fn test_rejects_non_http_secondary_url() {
        let mut config = RelayConfig::default();
        config.facade.secondary_url = "ftp://localhost/messages".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn test_request_timeout_must_outlast_retries() {
        let mut config = RelayConfig::default();
        config.facade.request_timeout_secs = 1;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::RequestTimeoutTooShort {
                actual_ms: 1_000,
                required_ms: 11_000,
            }]
        );

        config.facade.request_timeout_secs = 11;
        assert!(validate_config(&config).is_err());
        config.facade.request_timeout_secs = 12;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_request_timeout_covers_read_attempts() {
        let mut config = RelayConfig::default();
        config.retries.max_attempts = 1;
        config.retries.read_max_attempts = 5;
        config.facade.request_timeout_secs = 12;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::RequestTimeoutTooShort {
                actual_ms: 12_000,
                required_ms: 19_000,
            }]
        );
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = RelayConfig::default();
        config.observability.metrics_address = "bogus".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
