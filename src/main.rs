//! Arbitrage engine entry point
//!
//! 1. Loads `.env` and initializes logging
//! 2. Loads the YAML configuration (first argument, `ARB_CONFIG`, or `config.yaml`)
//! 3. Registers the configured venues and builds the engine
//! 4. Scans until Ctrl+C, then logs the final statistics

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use arb_engine::config::{self, constants};
use arb_engine::core::{scan_task, ArbitrageEngine};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

fn config_path() -> PathBuf {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("ARB_CONFIG").ok())
        .unwrap_or_else(|| "config.yaml".to_string())
        .into()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if it exists)
    dotenvy::dotenv().ok();

    config::init_logging();
    info!("Arbitrage engine starting...");
    constants::log_configuration();

    let path = config_path();
    let app_config = config::load_config(&path)
        .with_context(|| format!("loading {}", path.display()))?;
    info!(
        path = %path.display(),
        venues = app_config.enabled_venues().count(),
        symbols = ?app_config.scanner.symbols,
        "[CONFIG] Loaded"
    );

    let engine = Arc::new(ArbitrageEngine::from_config(&app_config)?);
    let exchanges = engine.exchanges();
    if exchanges.count < 2 {
        warn!(
            exchanges = ?exchanges.exchanges,
            "Fewer than two venues registered - no opportunities can be found"
        );
    }

    // Receiver exists before the signal task, so an early Ctrl-C is buffered
    let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);

    // Spawn SIGINT handler task
    let shutdown_signal = shutdown_tx.clone();
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("[SHUTDOWN] Graceful shutdown initiated");
                let _ = shutdown_signal.send(());
            }
            Err(err) => {
                error!(error = %err, "Failed to listen for Ctrl+C signal");
            }
        }
    });

    if app_config.scanner.symbols.is_empty() {
        warn!("[SCAN] No symbols configured - scanner not started");
        let _ = shutdown_rx.recv().await;
    } else {
        let scanner = tokio::spawn(scan_task(
            Arc::clone(&engine),
            app_config.scanner.clone(),
            shutdown_rx,
        ));
        match scanner.await {
            Ok(scans) => info!(total_scans = scans, "[SCAN] Scanner stopped"),
            Err(e) => error!(error = %e, "[SCAN] Scanner task failed"),
        }
    }

    let stats = engine.statistics().await?;
    info!(
        total = stats.total_executions,
        completed = stats.completed_executions,
        partial = stats.partial_executions,
        failed = stats.failed_executions,
        total_profit = %stats.total_profit.round_dp(8),
        success_rate = %stats.success_rate.round_dp(2),
        "[SHUTDOWN] Final statistics"
    );

    info!("[SHUTDOWN] Clean exit");
    Ok(())
}
