//! Exchange adapters for Binance, Coinbase, Kraken and a simulated venue
//!
//! This module provides the uniform venue capability (`ExchangeAdapter`),
//! the concrete REST adapters, and the registry the engine routes through.

pub mod binance;
pub mod coinbase;
pub mod errors;
pub mod factory;
pub mod kraken;
pub mod registry;
pub mod shared;
pub mod simulated;
pub mod timed;
pub mod traits;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types for convenience
pub use binance::BinanceAdapter;
pub use coinbase::CoinbaseAdapter;
pub use errors::{ExchangeError, ExchangeResult, FailureKind};
pub use factory::{build_registry, create_adapter, AnyAdapter};
pub use kraken::KrakenAdapter;
pub use registry::{Venue, VenueRegistry};
pub use simulated::SimulatedAdapter;
pub use timed::TimedAdapter;
pub use traits::ExchangeAdapter;
pub use types::{Balance, OrderInfo, OrderRequest, OrderResponse, OrderSide, OrderStatus, Quote};
