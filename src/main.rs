use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod tts;

use api::routes::{create_router, AppState};
use config::Config;
use tts::{OpenAiProvider, RateLimiter, SynthesisHandler};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // A missing credential stops the process here rather than on first use.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Configuration loaded");

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tokio::fs::create_dir_all(&config.output_dir).await?;

    tracing::info!("Happy TTS Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Output directory: {}", config.output_dir.display());
    tracing::info!(
        "Rate limit: {} calls per {}s",
        config.rate_limit_max_calls,
        config.rate_limit_period_secs
    );

    if !config.silence_file.exists() {
        tracing::warn!("Silence file {} is missing", config.silence_file.display());
    }

    let provider = OpenAiProvider::new(
        config.openai_key.clone(),
        config.openai_base_url.clone(),
        config.request_timeout(),
    )?;
    let limiter = Arc::new(RateLimiter::new(
        config.rate_limit_max_calls,
        config.rate_limit_period(),
    ));

    let synthesizer = SynthesisHandler::new(
        limiter,
        Arc::new(provider),
        config.output_dir.clone(),
        config.silence_file.clone(),
    );

    // Create app state
    let state = Arc::new(AppState { synthesizer });

    // Create router
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
