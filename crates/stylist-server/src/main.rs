//! stylist-server: fashion assistant chat backend.
//!
//! Loads configuration, connects the session store to the Groq API and
//! serves the HTTP routes until ctrl-c.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use stylist_ai::{GroqClient, GroqConfig, PipelineSettings, SessionStore};
use stylist_common::StylistError;
use stylist_config::env;
use stylist_server::{build_app, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stylist-server", about = "Fashion assistant chat backend")]
struct Args {
    /// Path to the TOML config file. Defaults to the user config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Interface to bind, overrides `server.host`.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overrides `server.port`.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "stylist-server exited");
            eprintln!("stylist-server: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), StylistError> {
    // Variables already in the process environment win over .env.
    let loaded = env::load_dotenv(Path::new(".env"));

    let mut config = stylist_config::load_config(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("stylist=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if loaded > 0 {
        tracing::debug!(vars = loaded, "loaded .env");
    }

    let groq = GroqConfig::from_settings(&config.model, env::api_key()?);
    tracing::info!(
        base_url = %groq.base_url,
        chat_model = %groq.chat_model,
        extraction_model = %groq.extraction_model,
        "Groq client configured"
    );
    let client = GroqClient::new(groq).map_err(|e| StylistError::Ai(e.to_string()))?;

    let store = SessionStore::new(Arc::new(client), PipelineSettings::from(&config.profile));
    let app = build_app(AppState::new(store), config.server.cors_allow_any_origin);

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("stylist-server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| StylistError::Server(e.to_string()))?;

    tracing::info!("stylist-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
