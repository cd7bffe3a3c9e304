//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, body decoding)
//!     → handlers.rs (call the facade)
//!     → response.rs (JSON or plain-text body)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::PostMessageResponse;
pub use server::{AppState, HttpServer};
