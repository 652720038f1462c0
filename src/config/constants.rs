//! Application-wide constants and configuration defaults
//!
//! Values used when the YAML file leaves a setting out. Each can be
//! overridden via an environment variable.

use std::time::Duration;

// =============================================================================
// Venue Calls
// =============================================================================

/// Deadline for any single venue call (default: 5000ms)
///
/// Environment variable: `VENUE_TIMEOUT_MS`
pub fn venue_timeout_ms() -> u64 {
    std::env::var("VENUE_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5000)
}

// =============================================================================
// Execution
// =============================================================================

/// Wait between a confirmed buy leg and the sell leg (default: 1000ms)
///
/// Environment variable: `SETTLEMENT_DELAY_MS`
pub fn settlement_delay_ms() -> u64 {
    std::env::var("SETTLEMENT_DELAY_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1000)
}

// =============================================================================
// Scanner
// =============================================================================

/// Interval between detection scans (default: 5000ms)
///
/// Environment variable: `SCAN_INTERVAL_MS`
pub fn scan_interval_ms() -> u64 {
    std::env::var("SCAN_INTERVAL_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5000)
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Print the effective defaults (for startup logs)
pub fn log_configuration() {
    tracing::info!("=== Default Configuration ===");
    tracing::info!("  - Venue timeout: {:?}", Duration::from_millis(venue_timeout_ms()));
    tracing::info!(
        "  - Settlement delay: {:?}",
        Duration::from_millis(settlement_delay_ms())
    );
    tracing::info!("  - Scan interval: {:?}", Duration::from_millis(scan_interval_ms()));
    tracing::info!("=============================");
}
