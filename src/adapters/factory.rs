//! Adapter factory for configured venues
//!
//! Creates adapters from `VenueConfig` entries. Uses an enum-based dispatch
//! (`AnyAdapter`) so the concrete adapter types stay monomorphized until
//! the registry erases them.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::info;

use crate::adapters::binance::BinanceAdapter;
use crate::adapters::coinbase::CoinbaseAdapter;
use crate::adapters::errors::ExchangeResult;
use crate::adapters::kraken::KrakenAdapter;
use crate::adapters::registry::VenueRegistry;
use crate::adapters::simulated::SimulatedAdapter;
use crate::adapters::traits::ExchangeAdapter;
use crate::adapters::types::{Balance, OrderInfo, OrderRequest, OrderResponse, Quote};
use crate::config::{AppConfig, VenueConfig, VenueKind};
use crate::error::AppError;

// =============================================================================
// AnyAdapter: enum-based dispatch for configured venues
// =============================================================================

pub enum AnyAdapter {
    Binance(BinanceAdapter),
    Coinbase(CoinbaseAdapter),
    Kraken(KrakenAdapter),
    Simulated(SimulatedAdapter),
}

/// Delegate a trait method to the wrapped adapter
macro_rules! delegate {
    ($self:expr, $method:ident ( $($arg:expr),* )) => {
        match $self {
            AnyAdapter::Binance(a) => a.$method($($arg),*),
            AnyAdapter::Coinbase(a) => a.$method($($arg),*),
            AnyAdapter::Kraken(a) => a.$method($($arg),*),
            AnyAdapter::Simulated(a) => a.$method($($arg),*),
        }
    };
    (await $self:expr, $method:ident ( $($arg:expr),* )) => {
        match $self {
            AnyAdapter::Binance(a) => a.$method($($arg),*).await,
            AnyAdapter::Coinbase(a) => a.$method($($arg),*).await,
            AnyAdapter::Kraken(a) => a.$method($($arg),*).await,
            AnyAdapter::Simulated(a) => a.$method($($arg),*).await,
        }
    };
}

#[async_trait]
impl ExchangeAdapter for AnyAdapter {
    async fn get_price(&self, symbol: &str) -> ExchangeResult<Quote> {
        delegate!(await self, get_price(symbol))
    }

    async fn get_balance(&self) -> ExchangeResult<Vec<Balance>> {
        delegate!(await self, get_balance())
    }

    async fn place_order(&self, order: OrderRequest) -> ExchangeResult<OrderResponse> {
        delegate!(await self, place_order(order))
    }

    async fn get_order_status(&self, order_ref: &str) -> ExchangeResult<Option<OrderInfo>> {
        delegate!(await self, get_order_status(order_ref))
    }

    async fn cancel_order(&self, order_ref: &str) -> ExchangeResult<()> {
        delegate!(await self, cancel_order(order_ref))
    }

    fn exchange_name(&self) -> &str {
        delegate!(self, exchange_name())
    }
}

// =============================================================================
// Construction
// =============================================================================

/// Build the adapter described by one venue entry
pub fn create_adapter(venue: &VenueConfig) -> AnyAdapter {
    let base_url = venue.base_url.as_deref();
    match venue.kind {
        VenueKind::Binance => AnyAdapter::Binance(BinanceAdapter::new(base_url)),
        VenueKind::Coinbase => AnyAdapter::Coinbase(CoinbaseAdapter::new(base_url)),
        VenueKind::Kraken => AnyAdapter::Kraken(KrakenAdapter::new(base_url)),
        VenueKind::Simulated => {
            let prices: Vec<(String, Decimal)> = venue
                .prices
                .iter()
                .map(|(symbol, price)| (symbol.to_uppercase(), *price))
                .collect();
            AnyAdapter::Simulated(
                SimulatedAdapter::new(venue.registration_name()).with_prices(prices),
            )
        }
    }
}

/// Register every enabled venue of `config`, in file order
pub fn build_registry(config: &AppConfig) -> Result<VenueRegistry, AppError> {
    let mut registry = VenueRegistry::new(config.engine.venue_timeout());
    for venue in config.enabled_venues() {
        registry.register(create_adapter(venue))?;
    }
    info!(venues = ?registry.names(), "[VENUE] Registry ready");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;
    use rust_decimal_macros::dec;

    #[test]
    fn test_create_adapter_names() {
        let config = load_config_from_str(
            r#"
venues:
  - kind: binance
  - kind: coinbase
  - kind: kraken
  - kind: simulated
    name: Paper
"#,
        )
        .unwrap();

        let names: Vec<String> = config
            .venues
            .iter()
            .map(|v| create_adapter(v).exchange_name().to_string())
            .collect();
        assert_eq!(names, vec!["binance", "coinbase", "kraken", "paper"]);
    }

    #[tokio::test]
    async fn test_build_registry_skips_disabled_and_seeds_prices() {
        let config = load_config_from_str(
            r#"
venues:
  - kind: simulated
    name: east
    prices:
      btc: 30000
  - kind: binance
    enabled: false
"#,
        )
        .unwrap();

        let registry = build_registry(&config).unwrap();
        assert_eq!(registry.names(), vec!["east"]);

        let quote = registry.get("east").unwrap().get_price("BTC").await.unwrap();
        assert_eq!(quote.price, dec!(30000));
    }
}
