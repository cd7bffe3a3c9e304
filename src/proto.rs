//! gRPC wire types for the log store (`msglog.v1.LogStore`).
//!
//! ```text
//! service LogStore {
//!   rpc LogMessage(LogRequest) returns (LogResponse);
//!   rpc GetMessages(Empty)     returns (MessagesResponse);
//! }
//! ```
//!
//! The messages are declared here with `prost` derives; the client and server
//! stubs (`log_store_client`, `log_store_server`) are generated by `build.rs`.

/// Request to record one message under a caller-chosen id.
#[derive(Clone, PartialEq, prost::Message)]
pub struct LogRequest {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub msg: String,
}

/// Outcome of a `LogMessage` call.
///
/// `success == true` with a non-empty `error` is never produced by the store
/// and must be treated as a protocol violation by callers.
#[derive(Clone, PartialEq, prost::Message)]
pub struct LogResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub error: String,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct Empty {}

/// Snapshot of every stored message text, in insertion order.
#[derive(Clone, PartialEq, prost::Message)]
pub struct MessagesResponse {
    #[prost(string, repeated, tag = "1")]
    pub messages: Vec<String>,
}

include!(concat!(env!("OUT_DIR"), "/msglog.v1.LogStore.rs"));
