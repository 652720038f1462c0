//! Cross-exchange arbitrage engine
//!
//! - Exchange adapters (Binance, Coinbase, Kraken, simulated) behind one trait
//! - All-pairs opportunity detection with capital-bounded sizing
//! - Two-leg buy/sell execution with an append-only ledger and statistics

pub mod adapters;
pub mod config;
pub mod core;
pub mod error;

pub use error::AppError;
