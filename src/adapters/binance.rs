//! Binance spot adapter
//!
//! Quotes come from the public ticker endpoint priced in USDT. Account and
//! order endpoints require HMAC-signed requests, which this adapter does not
//! carry, so they answer `AuthRequired`.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::shared::{create_http_client, get_json, parse_price};
use crate::adapters::traits::ExchangeAdapter;
use crate::adapters::types::{Balance, OrderInfo, OrderRequest, OrderResponse, Quote};

/// Public REST base URL
pub const BINANCE_BASE_URL: &str = "https://api.binance.com/api";

/// `GET /v3/ticker/price` payload
#[derive(Debug, Deserialize)]
struct TickerPrice {
    price: String,
}

pub struct BinanceAdapter {
    client: reqwest::Client,
    base_url: String,
}

impl BinanceAdapter {
    pub fn new(base_url: Option<&str>) -> Self {
        Self {
            client: create_http_client("binance"),
            base_url: base_url
                .unwrap_or(BINANCE_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
        }
    }

    fn ticker_url(&self, symbol: &str) -> String {
        format!(
            "{}/v3/ticker/price?symbol={}USDT",
            self.base_url,
            symbol.to_uppercase()
        )
    }

    fn auth_required(&self) -> ExchangeError {
        ExchangeError::AuthRequired(self.exchange_name().to_string())
    }
}

impl Default for BinanceAdapter {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl ExchangeAdapter for BinanceAdapter {
    async fn get_price(&self, symbol: &str) -> ExchangeResult<Quote> {
        let ticker: TickerPrice = get_json(&self.client, &self.ticker_url(symbol), symbol).await?;
        let price = parse_price(&ticker.price, symbol)?;
        debug!(venue = "binance", symbol, %price, "[VENUE] Quote received");
        Ok(Quote::new(symbol, price))
    }

    async fn get_balance(&self) -> ExchangeResult<Vec<Balance>> {
        Err(self.auth_required())
    }

    async fn place_order(&self, order: OrderRequest) -> ExchangeResult<OrderResponse> {
        debug!(
            venue = "binance",
            symbol = %order.symbol,
            side = %order.side,
            quantity = %order.quantity,
            "[VENUE] Order refused: no signing credentials"
        );
        Err(self.auth_required())
    }

    async fn get_order_status(&self, _order_ref: &str) -> ExchangeResult<Option<OrderInfo>> {
        Err(self.auth_required())
    }

    async fn cancel_order(&self, _order_ref: &str) -> ExchangeResult<()> {
        Err(self.auth_required())
    }

    fn exchange_name(&self) -> &str {
        "binance"
    }
}
