//! Message relay: an idempotent log store behind gRPC and an HTTP facade that
//! aggregates it with a secondary message source.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────┐
//!   POST/GET      │              message-relay               │
//!  /messages ────▶│  http ──▶ facade ──▶ resilience (retry)  │
//!                 │              │   │                        │
//!                 └──────────────┼───┼────────────────────────┘
//!                         gRPC   │   │  HTTP GET
//!                                ▼   ▼
//!                 ┌──────────────────┐ ┌──────────────────────┐
//!                 │    log-store     │ │  messages-service    │
//!                 │ store (Mutex map)│ │  (static text stub)  │
//!                 └──────────────────┘ └──────────────────────┘
//! ```
//!
//! Cross-cutting: `config` (TOML + validation), `observability` (tracing,
//! metrics), `lifecycle` (signals, graceful shutdown).

// Core subsystems
pub mod facade;
pub mod http;
pub mod proto;
pub mod store;

// Collaborators
pub mod messages_service;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::RelayConfig;
pub use facade::Facade;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use messages_service::MessagesService;
pub use store::{LogStore, RpcServer};
