//! The two representations of a client body sent upstream.
//!
//! Devices in the field occasionally emit truncated or hand-assembled JSON.
//! Those bodies are not rejected; they are forwarded verbatim and the
//! upstream gets to decide what to do with them.

use actix_web::web::Bytes;
use serde_json::Value;

/// Body of one forwarding request, classified exactly once.
#[derive(Debug, Clone)]
pub enum ForwardPayload {
    /// The body parsed as JSON; re-serialized when sent upstream.
    Structured(Value),
    /// The original bytes, forwarded unmodified.
    Raw(Bytes),
}

impl ForwardPayload {
    /// Classify a request body. An empty body is not valid JSON and falls
    /// through to `Raw`.
    pub fn classify(body: Bytes) -> Self {
        match serde_json::from_slice::<Value>(&body) {
            Ok(value) => ForwardPayload::Structured(value),
            Err(_) => ForwardPayload::Raw(body),
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, ForwardPayload::Structured(_))
    }
}
