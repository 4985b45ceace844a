//! Wolof TTS - a web demo for a pretrained Wolof text-to-speech model.
//!
//! Loads a VITS model through sherpa-onnx once at startup, then serves a page
//! with one text field and one audio player. Each submission is synthesized
//! into a single fixed output file conditioned on a reference voice sample.

mod app;
mod audio;
mod config;
mod download;
mod tts;
mod web;

use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;

use app::{SharedSynthesizer, SpeechAdapter};
use config::AppConfig;
use tts::Synthesizer;
use web::WebState;

/// Title shown on the demo page.
const DEMO_TITLE: &str = "Wolof TTS for Tontetic";

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn wait_for_shutdown(shutdown: CancellationToken) {
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("🛑 Received Ctrl+C, shutting down...");
        }
        _ = async {
            #[cfg(unix)]
            {
                match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                    Ok(mut sigterm) => {
                        sigterm.recv().await;
                    }
                    Err(e) => {
                        error!("Failed to register SIGTERM handler: {}", e);
                        std::future::pending::<()>().await;
                    }
                }
            }
            #[cfg(not(unix))]
            {
                std::future::pending::<()>().await;
            }
        } => {
            info!("🛑 Received SIGTERM, shutting down...");
        }
    }

    shutdown.cancel();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments (also selects the compute device)
    let config = AppConfig::from_args();

    // Respect RUST_LOG env var, fallback to verbose flag, default to info
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| if config.verbose { EnvFilter::try_new("debug") } else { EnvFilter::try_new("info") })
        .context("Invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(LocalTime::new(time::macros::format_description!("[hour]:[minute]:[second]")))
        .init();

    info!("🗣️  Wolof TTS v{}", env!("CARGO_PKG_VERSION"));

    // Fetch the model if requested and missing
    let download_config = config.clone();
    if let Err(e) = tokio::task::spawn_blocking(move || download::ensure_model(&download_config)).await? {
        error!("❌ Model download failed: {:#}", e);
        std::process::exit(1);
    }

    if let Err(e) = config.validate() {
        error!("❌ Configuration error: {}", e);
        error!("Place model.onnx and tokens.txt under {} or run with --download.", config.tts_dir().display());
        std::process::exit(1);
    }

    // The model must load before any UI is served
    let provider = config.effective_provider();
    let synthesizer = Synthesizer::new(&config, provider).context("Failed to load TTS model")?;
    info!("TTS sample rate: {}", synthesizer.describe_sample_rate());

    let synthesizer: SharedSynthesizer = Arc::new(Mutex::new(synthesizer));
    let adapter = SpeechAdapter::new(synthesizer, config.output_path.clone(), config.speaker_wav.clone(), config.language.clone());

    let router = web::create_router(WebState { adapter, show_error: config.show_error, title: DEMO_TITLE.to_string() });

    config.log_config();

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_shutdown(shutdown.clone()));

    web::serve(router, &config.host, config.port, shutdown).await?;

    info!("✅ Wolof TTS stopped");
    Ok(())
}
