//! Groq Relay - HTTP relay between embedded devices and the Groq API.
//!
//! ESP32 firmware speaks plain HTTP and cannot be trusted to hold an API
//! credential. This crate exposes the OpenAI-style `/v1/chat/completions`
//! surface on the local network edge, attaches the server-held
//! `GROQ_API_KEY`, and forwards each request to Groq, mirroring the
//! upstream status, content type, and body back unmodified.
//!
//! Design goals:
//! - Accept device traffic: opaque chat-completion JSON, or the raw bytes
//!   verbatim when the device emits malformed JSON.
//! - Forward to the Groq chat-completions endpoint with bearer auth, one
//!   attempt, bounded by a timeout.
//! - Mirror the response without re-shaping it; non-JSON upstream payloads
//!   pass through untouched.

pub mod config;
pub mod payload;
pub mod relay;
pub mod server;

pub use config::RelayConfig;
pub use server::serve;
