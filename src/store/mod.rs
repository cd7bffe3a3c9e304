//! Log store subsystem.
//!
//! # Data Flow
//! ```text
//! gRPC call (LogMessage / GetMessages)
//!     → server.rs (tonic transport, graceful shutdown)
//!     → service.rs (decode request, map outcome to wire response)
//!     → log_store.rs (validate, lock, dedup or insert, snapshot)
//! ```
//!
//! # Design Decisions
//! - Store state is owned by `LogStore`; nothing else touches the map
//! - Duplicate ids succeed without writing (safe client retries)
//! - Structural errors go in the response body, never as a gRPC status

pub mod log_store;
pub mod server;
pub mod service;

pub use log_store::{LogStore, WriteOutcome};
pub use server::RpcServer;
pub use service::LogStoreService;
