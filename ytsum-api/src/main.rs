//! ytsum-api - YouTube summarizer HTTP backend
//!
//! Serves registration/login against an in-memory store and forwards
//! YouTube links to Gemini for summarization.
//!
//! Startup never fails for a missing `GEMINI_API_KEY`: the service runs in
//! degraded mode where `/api/summarize` and `/api/ask` return 500.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ytsum_api::generator::{ContentGenerator, GeminiClient};
use ytsum_api::summarizer::Summarizer;
use ytsum_api::{build_router, AppState};
use ytsum_common::config::{
    default_config_path, resolve_gemini_api_key, resolve_listen_addr, write_toml_config,
    TomlConfig, GEMINI_API_KEY_ENV,
};

/// Command-line arguments for ytsum-api
#[derive(Parser, Debug)]
#[command(name = "ytsum-api")]
#[command(about = "YouTube summarizer HTTP backend")]
#[command(version)]
struct Args {
    /// TOML config file (default: <config dir>/ytsum/config.toml)
    #[arg(short, long, env = "YTSUM_CONFIG")]
    config: Option<PathBuf>,

    /// Host to listen on
    #[arg(long, env = "YTSUM_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "YTSUM_PORT")]
    port: Option<u16>,

    /// Write a config file with default values and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config.clone().or_else(default_config_path);

    if args.init_config {
        let path = config_path.context("No config path available; pass --config")?;
        write_toml_config(&TomlConfig::default(), &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    // Read the config before tracing init so its log level can apply;
    // the outcome is logged right after.
    let loaded = TomlConfig::load_optional(config_path.as_deref());
    let log_level = match &loaded {
        Ok(Some(config)) => config.logging.level.clone(),
        _ => "info".to_string(),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "ytsum_api={level},ytsum_common={level},tower_http={level}",
                level = log_level
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting ytsum-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let toml_config = match loaded {
        Ok(Some(config)) => {
            if let Some(path) = &config_path {
                info!("Loaded config from {}", path.display());
            }
            config
        }
        Ok(None) => {
            info!("No config file found, using defaults");
            TomlConfig::default()
        }
        Err(e) => {
            warn!("Ignoring unreadable config file: {}", e);
            TomlConfig::default()
        }
    };

    // Built once, shared read-only by every request
    let generator: Option<Arc<dyn ContentGenerator>> = match resolve_gemini_api_key(&toml_config) {
        Some(key) => match GeminiClient::new(key, &toml_config.generator) {
            Ok(client) => {
                info!("✓ Gemini client initialized (model {})", toml_config.generator.model);
                let client: Arc<dyn ContentGenerator> = Arc::new(client);
                Some(client)
            }
            Err(e) => {
                error!("Failed to initialize Gemini client: {}", e);
                None
            }
        },
        None => {
            warn!(
                "{} not set; /api/summarize and /api/ask will return 500",
                GEMINI_API_KEY_ENV
            );
            None
        }
    };

    let summarizer = Summarizer::new(generator, toml_config.generator.model.clone());
    let state = AppState::new(summarizer);
    let app = build_router(state);

    let addr = resolve_listen_addr(args.host.as_deref(), args.port, &toml_config);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("ytsum-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
