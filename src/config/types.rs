//! Configuration types for the arbitrage engine
//!
//! This module defines all configuration structs that are loaded from YAML.
//! Every section has defaults, so a minimal file only lists venues and
//! symbols.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::constants;
use crate::error::AppError;

// ============================================================================
// Enums
// ============================================================================

/// Supported venues
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VenueKind {
    Binance,
    Coinbase,
    Kraken,
    Simulated,
}

impl std::fmt::Display for VenueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VenueKind::Binance => write!(f, "binance"),
            VenueKind::Coinbase => write!(f, "coinbase"),
            VenueKind::Kraken => write!(f, "kraken"),
            VenueKind::Simulated => write!(f, "simulated"),
        }
    }
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Detection and execution parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Minimum profit margin to report an opportunity (percentage, 0.5 = 0.5%)
    #[serde(default = "default_min_profit_margin_pct")]
    pub min_profit_margin_pct: Decimal,
    /// Capital committed per trade, in quote-currency units
    #[serde(default = "default_max_trade_amount")]
    pub max_trade_amount: Decimal,
    /// Wait between a confirmed buy and the sell leg
    #[serde(default = "constants::settlement_delay_ms")]
    pub settlement_delay_ms: u64,
    /// Deadline for every venue call
    #[serde(default = "constants::venue_timeout_ms")]
    pub venue_timeout_ms: u64,
}

fn default_min_profit_margin_pct() -> Decimal {
    Decimal::new(5, 1)
}

fn default_max_trade_amount() -> Decimal {
    Decimal::ONE_THOUSAND
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_profit_margin_pct: default_min_profit_margin_pct(),
            max_trade_amount: default_max_trade_amount(),
            settlement_delay_ms: constants::settlement_delay_ms(),
            venue_timeout_ms: constants::venue_timeout_ms(),
        }
    }
}

impl EngineConfig {
    pub fn settlement_delay(&self) -> Duration {
        Duration::from_millis(self.settlement_delay_ms)
    }

    pub fn venue_timeout(&self) -> Duration {
        Duration::from_millis(self.venue_timeout_ms)
    }

    /// Validate engine parameters
    pub fn validate(&self) -> Result<(), AppError> {
        if self.min_profit_margin_pct < Decimal::ZERO
            || self.min_profit_margin_pct >= Decimal::ONE_HUNDRED
        {
            return Err(AppError::Config(format!(
                "min_profit_margin_pct must be >= 0 and < 100 (got {})",
                self.min_profit_margin_pct
            )));
        }

        if self.max_trade_amount <= Decimal::ZERO {
            return Err(AppError::Config(format!(
                "max_trade_amount must be > 0 (got {})",
                self.max_trade_amount
            )));
        }

        if self.venue_timeout_ms == 0 {
            return Err(AppError::Config(
                "venue_timeout_ms must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// One venue to register
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueConfig {
    pub kind: VenueKind,
    /// Registration name (simulated venues only; real venues use their kind)
    #[serde(default)]
    pub name: Option<String>,
    /// Override of the public REST base URL
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seed quotes for simulated venues
    #[serde(default)]
    pub prices: HashMap<String, Decimal>,
}

fn default_true() -> bool {
    true
}

impl VenueConfig {
    /// Name the venue is registered under (lowercase)
    pub fn registration_name(&self) -> String {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_lowercase)
            .unwrap_or_else(|| self.kind.to_string())
    }

    /// Validate venue configuration rules
    pub fn validate(&self) -> Result<(), AppError> {
        if self.kind != VenueKind::Simulated {
            if self.name.is_some() {
                return Err(AppError::Config(format!(
                    "Venue '{}': only simulated venues can be renamed",
                    self.kind
                )));
            }
            if !self.prices.is_empty() {
                return Err(AppError::Config(format!(
                    "Venue '{}': seed prices are only valid for simulated venues",
                    self.kind
                )));
            }
        }

        if let Some((symbol, price)) = self.prices.iter().find(|(_, p)| **p <= Decimal::ZERO) {
            return Err(AppError::Config(format!(
                "Venue '{}': price for {} must be > 0 (got {})",
                self.registration_name(),
                symbol,
                price
            )));
        }

        Ok(())
    }
}

/// Periodic scanning behaviour of the binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Symbols to scan each interval (e.g. ["BTC", "ETH"])
    #[serde(default)]
    pub symbols: Vec<String>,
    #[serde(default = "constants::scan_interval_ms")]
    pub interval_ms: u64,
    /// Execute the best opportunity of each scan
    #[serde(default)]
    pub auto_execute: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            symbols: Vec::new(),
            interval_ms: constants::scan_interval_ms(),
            auto_execute: false,
        }
    }
}

impl ScannerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.interval_ms == 0 {
            return Err(AppError::Config("scanner interval_ms must be > 0".to_string()));
        }
        if self.symbols.iter().any(|s| s.trim().is_empty()) {
            return Err(AppError::Config("scanner symbols cannot be empty strings".to_string()));
        }
        Ok(())
    }
}

/// Root application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub venues: Vec<VenueConfig>,
    #[serde(default)]
    pub scanner: ScannerConfig,
}

impl AppConfig {
    /// Validate all configuration rules
    pub fn validate(&self) -> Result<(), AppError> {
        self.engine.validate()?;
        self.scanner.validate()?;

        let mut names = HashSet::new();
        for venue in self.enabled_venues() {
            venue.validate()?;

            // Rule: registration names are unique
            let name = venue.registration_name();
            if !names.insert(name.clone()) {
                return Err(AppError::Config(format!(
                    "Venue '{}' is configured more than once",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Venues with `enabled: true`, in file order
    pub fn enabled_venues(&self) -> impl Iterator<Item = &VenueConfig> {
        self.venues.iter().filter(|v| v.enabled)
    }
}
