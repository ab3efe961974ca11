//! `groq-relay` binary entrypoint.
//!
//! This starts the Actix Web server using configuration from environment
//! variables.

use groq_relay::{serve, RelayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Respect `RUST_LOG` if set; default to info so request summaries show.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = RelayConfig::default();
    serve(config).await
}
