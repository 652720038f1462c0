//! Periodic scan task
//!
//! Runs detection every `interval_ms` until the shutdown broadcast fires.
//! With `auto_execute`, the best opportunity of each scan is executed at
//! its sized quantity.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::config::ScannerConfig;
use crate::core::engine::ArbitrageEngine;
use crate::core::execution::ExecuteRequest;

/// Scan until shutdown; returns the number of completed scans
pub async fn scan_task(
    engine: Arc<ArbitrageEngine>,
    config: ScannerConfig,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> u64 {
    info!(
        symbols = ?config.symbols,
        interval_ms = config.interval_ms,
        auto_execute = config.auto_execute,
        "[SCAN] Scanner started"
    );

    let mut ticker = interval(config.interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut scan_count: u64 = 0;

    loop {
        tokio::select! {
            // Shutdown takes priority
            biased;
            _ = shutdown_rx.recv() => {
                info!(total_scans = scan_count, "[SCAN] Scanner shutting down");
                break;
            }
            _ = ticker.tick() => {
                scan_once(&engine, &config).await;
                scan_count += 1;
            }
        }
    }

    scan_count
}

async fn scan_once(engine: &ArbitrageEngine, config: &ScannerConfig) {
    let detected = engine.detect(&config.symbols).await;
    for opportunity in &detected.opportunities {
        info!(opportunity = %opportunity, "[SCAN] Opportunity");
    }

    if !config.auto_execute {
        return;
    }
    let Some(best) = detected.opportunities.first() else {
        return;
    };

    match engine.execute(ExecuteRequest::from(best)).await {
        Ok(response) => info!(
            id = %response.execution.id,
            status = %response.execution.status,
            success = response.success,
            "[TRADE] Auto-executed"
        ),
        Err(e) => warn!(error = %e, "[TRADE] Auto-execution rejected"),
    }
}
