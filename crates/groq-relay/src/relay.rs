//! The upstream exchange: one authenticated POST to Groq, then a
//! content-type-aware mirror of whatever came back.

use actix_web::{http::StatusCode, web::Bytes, HttpResponse};
use thiserror::Error;
use tracing::warn;

use crate::config::RelayConfig;
use crate::payload::ForwardPayload;

/// Longest slice of a request or response body that makes it into the logs.
pub const BODY_PREVIEW_LIMIT: usize = 2000;

#[derive(Debug, Error)]
pub enum RelayError {
    /// The server-side credential was never configured. Checked on every
    /// request, never fatal to the process.
    #[error("Missing GROQ_API_KEY environment variable")]
    MissingCredential,

    /// The upstream call failed at the transport level (timeout, connect
    /// error, DNS). Never retried.
    #[error("{0}")]
    Upstream(#[from] reqwest::Error),
}

/// An upstream response, fully read before anything is written back to the
/// device.
#[derive(Debug)]
pub struct UpstreamReply {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Send the payload to the configured upstream with bearer auth.
///
/// The credential is checked before any socket is opened.
pub async fn send_upstream(
    client: &reqwest::Client,
    config: &RelayConfig,
    payload: &ForwardPayload,
) -> Result<UpstreamReply, RelayError> {
    let api_key = config.credential().ok_or(RelayError::MissingCredential)?;

    let request = client
        .post(&config.upstream_url)
        .bearer_auth(api_key)
        .header("content-type", "application/json");

    let request = match payload {
        ForwardPayload::Structured(value) => request.json(value),
        ForwardPayload::Raw(bytes) => request.body(bytes.to_vec()),
    };

    let response = request.send().await?;

    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = response.bytes().await?;

    Ok(UpstreamReply {
        status,
        content_type,
        body,
    })
}

/// Turn the upstream reply into the response for the device.
///
/// JSON upstream bodies are re-serialized. A body that claims JSON but does
/// not parse is degraded to `text/plain` with the bytes untouched, keeping
/// the upstream's status code. Any other content type passes through
/// verbatim, never re-encoded.
pub fn mirror_response(reply: UpstreamReply) -> HttpResponse {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::OK);

    if claims_json(reply.content_type.as_deref()) {
        return match serde_json::from_slice::<serde_json::Value>(&reply.body) {
            Ok(value) => HttpResponse::build(status).json(value),
            Err(error) => {
                warn!(%error, status = reply.status, "upstream declared JSON but body does not parse");
                HttpResponse::build(status)
                    .content_type("text/plain")
                    .body(reply.body)
            }
        };
    }

    let content_type = reply
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    HttpResponse::build(status)
        .content_type(content_type.as_str())
        .body(reply.body)
}

/// Case-insensitive substring match on an upstream `Content-Type` value.
pub fn claims_json(content_type: Option<&str>) -> bool {
    content_type
        .map(|value| value.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false)
}

/// Truncate a body for the diagnostic logs.
pub fn preview(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    match text.char_indices().nth(BODY_PREVIEW_LIMIT) {
        Some((index, _)) => format!("{}… ({} bytes total)", &text[..index], body.len()),
        None => text.into_owned(),
    }
}
