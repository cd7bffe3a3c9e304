//! Rust client for the message relay facade.

pub mod client;

pub use client::{PostMessageResponse, RelayClient, RelayError};
