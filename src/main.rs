//! asr-ime-bridge: run the ASR input-method engine behind a stdio host
//!
//! Reads host events as JSON lines on stdin and writes commits and key
//! results as JSON lines on stdout. Logs go to stderr.
//!
//! - Creates the command and commit FIFOs if needed
//! - Forwards hotkeys to the recognizer as `toggle` / `command`
//! - Commits recognized lines to the most recently focused context

use anyhow::{Context, Result};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use asr_ime_bridge::adapter::{self, LineHost};
use asr_ime_bridge::lifecycle::ShutdownSignal;
use asr_ime_bridge::{Config, Engine};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; stdout carries the host protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "asr-ime-bridge starting"
    );

    // Load configuration
    let config = Config::load();
    info!(
        command_fifo = ?config.command_fifo,
        commit_fifo = ?config.commit_fifo,
        hotkey_file = ?config.hotkey_file,
        "configuration loaded"
    );

    let mut shutdown = ShutdownSignal::new().context("failed to install signal handlers")?;

    let mut engine = Engine::new(&config, LineHost::new(std::io::stdout()))
        .context("failed to start ASR engine")?;

    info!("engine initialized, entering main loop");

    adapter::run(&mut engine, BufReader::new(tokio::io::stdin()), &mut shutdown).await?;

    // Cleanup
    info!("shutting down...");
    drop(engine);

    info!("asr-ime-bridge stopped");

    Ok(())
}
