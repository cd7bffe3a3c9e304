//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → command-line overrides (per binary)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{finalize, load_config, load_or_default, ConfigError};
pub use schema::{
    FacadeConfig, ObservabilityConfig, RelayConfig, RetryConfig, SecondaryConfig, StoreConfig,
};
