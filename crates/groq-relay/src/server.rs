//! Actix Web HTTP surface.
//!
//! Routes:
//! - `GET /` and `GET /health`: liveness probe
//! - `GET /v1/chat/completions`: informational (the device should POST)
//! - `POST /v1/chat/completions`: the forwarding path
//! - `OPTIONS` on any path: CORS preflight acknowledgment
//! - anything else: `404`

use actix_web::{
    http::Method, middleware::DefaultHeaders, web, App, HttpRequest, HttpResponse, HttpServer,
};
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::{
    config::RelayConfig,
    payload::ForwardPayload,
    relay::{self, RelayError},
};

#[derive(Clone)]
pub struct AppState {
    pub config: RelayConfig,
    pub client: reqwest::Client,
}

/// Fixed JSON error shape shared by the 404, 500, and 502 responses.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

#[derive(Serialize)]
struct InfoBody {
    message: &'static str,
}

pub async fn serve(config: RelayConfig) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.port);
    info!(addr = %addr, upstream = %config.upstream_url, "groq-relay listening");

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
        .build()
        .context("failed to build reqwest client")?;

    let state = web::Data::new(AppState { config, client });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors_headers())
            .configure(configure)
    })
    .bind(&addr)
    .with_context(|| format!("failed to bind {}", addr))?
    .run()
    .await
    .context("server error")?;

    Ok(())
}

/// The cross-origin header trio the devices' web configurator expects on
/// every response, CORS negotiation or not.
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET, POST, OPTIONS"))
        .add(("Access-Control-Allow-Headers", "Content-Type, Authorization"))
}

/// Route table, shared between `serve` and the test harness.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(health_check))
            .default_service(web::route().to(fallback)),
    )
    .service(
        web::resource("/health")
            .route(web::get().to(health_check))
            .default_service(web::route().to(fallback)),
    )
    .service(
        web::resource("/v1/chat/completions")
            .route(web::get().to(completions_info))
            .route(web::post().to(forward_chat_completion))
            .default_service(web::route().to(fallback)),
    )
    .default_service(web::route().to(fallback));
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body("OK")
}

async fn completions_info() -> HttpResponse {
    HttpResponse::Ok().json(InfoBody {
        message: "Send chat completion requests as POST to /v1/chat/completions.",
    })
}

/// Preflights are acknowledged on any path; every other unmatched
/// method/path combination is a 404.
async fn fallback(req: HttpRequest) -> HttpResponse {
    if req.method() == Method::OPTIONS {
        return HttpResponse::NoContent().finish();
    }
    HttpResponse::NotFound().json(ErrorBody {
        error: "Not Found",
        detail: None,
    })
}

async fn forward_chat_completion(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> HttpResponse {
    info!(
        bytes = body.len(),
        preview = %relay::preview(&body),
        "chat completion request from device"
    );

    let payload = ForwardPayload::classify(body);
    if let ForwardPayload::Raw(bytes) = &payload {
        if !bytes.is_empty() {
            warn!(bytes = bytes.len(), "request body is not valid JSON; forwarding the raw bytes");
        }
    }

    let reply = match relay::send_upstream(&state.client, &state.config, &payload).await {
        Ok(reply) => reply,
        Err(error) => return relay_error_response(error),
    };

    info!(
        status = reply.status,
        content_type = reply.content_type.as_deref().unwrap_or("<none>"),
        preview = %relay::preview(&reply.body),
        "upstream response"
    );

    relay::mirror_response(reply)
}

fn relay_error_response(error: RelayError) -> HttpResponse {
    match error {
        RelayError::MissingCredential => {
            error!("GROQ_API_KEY is not set; refusing to forward");
            HttpResponse::InternalServerError().json(ErrorBody {
                error: "Server misconfigured",
                detail: Some(error.to_string()),
            })
        }
        RelayError::Upstream(_) => {
            error!(%error, "upstream request failed");
            HttpResponse::BadGateway().json(ErrorBody {
                error: "Upstream request failed",
                detail: Some(error.to_string()),
            })
        }
    }
}
