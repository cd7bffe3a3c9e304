//! Configuration schema definitions.
//!
//! One file configures all three processes; each binary reads the section it
//! needs. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration shared by the store, the facade and the stub source.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Log store gRPC server settings.
    pub store: StoreConfig,

    /// Aggregation facade settings.
    pub facade: FacadeConfig,

    /// Retry policies for calls from the facade to the log store.
    pub retries: RetryConfig,

    /// Stub secondary message source settings.
    pub secondary: SecondaryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Log store server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Bind address (e.g., "0.0.0.0:50051").
    pub bind_address: String,

    /// Runtime worker threads serving RPCs.
    pub worker_threads: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:50051".to_string(),
            worker_threads: 10,
        }
    }
}

/// Aggregation facade configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FacadeConfig {
    /// HTTP bind address.
    pub bind_address: String,

    /// Log store host.
    pub store_host: String,

    /// Log store gRPC port.
    pub store_port: u16,

    /// Full URL of the secondary message source.
    pub secondary_url: String,

    /// Deadline for each individual remote call in milliseconds.
    pub call_timeout_ms: u64,

    /// Upper bound on a whole client request, retries included.
    pub request_timeout_secs: u64,
}

impl FacadeConfig {
    /// URI of the log store endpoint.
    pub fn store_uri(&self) -> String {
        format!("http://{}:{}", self.store_host, self.store_port)
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }
}

impl Default for FacadeConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
            store_host: "localhost".to_string(),
            store_port: 50051,
            secondary_url: "http://localhost:5002/messages".to_string(),
            call_timeout_ms: 3000,
            request_timeout_secs: 30,
        }
    }
}

/// Retry configuration.
///
/// Writes and reads carry separate attempt limits. Reads default to a single
/// attempt.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum attempts for `LogMessage`.
    pub max_attempts: u32,

    /// Fixed delay between attempts in milliseconds.
    pub delay_ms: u64,

    /// Maximum attempts for `GetMessages`.
    pub read_max_attempts: u32,
}

impl RetryConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_ms: 1000,
            read_max_attempts: 1,
        }
    }
}

/// Stub secondary source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecondaryConfig {
    /// HTTP bind address.
    pub bind_address: String,

    /// Plain-text body served on `GET /messages`.
    pub body: String,
}

impl Default for SecondaryConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5002".to_string(),
            body: "not implemented yet".to_string(),
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_constants() {
        let config = RelayConfig::default();
        assert_eq!(config.retries.max_attempts, 3);
        assert_eq!(config.retries.delay(), Duration::from_secs(1));
        assert_eq!(config.retries.read_max_attempts, 1);
        assert_eq!(config.facade.call_timeout(), Duration::from_secs(3));
        assert_eq!(config.facade.store_uri(), "http://localhost:50051");
        assert_eq!(config.secondary.body, "not implemented yet");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: RelayConfig = toml::from_str(
            r#"
            [facade]
            store_port = 6000

            [retries]
            delay_ms = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.facade.store_port, 6000);
        assert_eq!(config.facade.store_host, "localhost");
        assert_eq!(config.retries.delay_ms, 10);
        assert_eq!(config.retries.max_attempts, 3);
        assert_eq!(config.store.worker_threads, 10);
    }
}
