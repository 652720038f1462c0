//! Coinbase spot adapter
//!
//! Quotes come from the public `prices/{PAIR}/spot` endpoint in USD.
//! Private endpoints need signed requests and answer `AuthRequired`.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::shared::{create_http_client, get_json, parse_price};
use crate::adapters::traits::ExchangeAdapter;
use crate::adapters::types::{Balance, OrderInfo, OrderRequest, OrderResponse, Quote};

pub const COINBASE_BASE_URL: &str = "https://api.coinbase.com/v2";

#[derive(Debug, Deserialize)]
struct SpotEnvelope {
    data: SpotPrice,
}

#[derive(Debug, Deserialize)]
struct SpotPrice {
    amount: String,
}

pub struct CoinbaseAdapter {
    client: reqwest::Client,
    base_url: String,
}

impl CoinbaseAdapter {
    pub fn new(base_url: Option<&str>) -> Self {
        Self {
            client: create_http_client("coinbase"),
            base_url: base_url
                .unwrap_or(COINBASE_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
        }
    }

    fn auth_required(&self) -> ExchangeError {
        ExchangeError::AuthRequired(self.exchange_name().to_string())
    }
}

impl Default for CoinbaseAdapter {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl ExchangeAdapter for CoinbaseAdapter {
    async fn get_price(&self, symbol: &str) -> ExchangeResult<Quote> {
        let url = format!("{}/prices/{}-USD/spot", self.base_url, symbol.to_uppercase());
        let envelope: SpotEnvelope = get_json(&self.client, &url, symbol).await?;
        let price = parse_price(&envelope.data.amount, symbol)?;
        debug!(venue = "coinbase", symbol, %price, "[VENUE] Quote received");
        Ok(Quote::new(symbol, price))
    }

    async fn get_balance(&self) -> ExchangeResult<Vec<Balance>> {
        Err(self.auth_required())
    }

    async fn place_order(&self, _order: OrderRequest) -> ExchangeResult<OrderResponse> {
        Err(self.auth_required())
    }

    async fn get_order_status(&self, _order_ref: &str) -> ExchangeResult<Option<OrderInfo>> {
        Err(self.auth_required())
    }

    async fn cancel_order(&self, _order_ref: &str) -> ExchangeResult<()> {
        Err(self.auth_required())
    }

    fn exchange_name(&self) -> &str {
        "coinbase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_get_price_parses_spot() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/prices/ETH-USD/spot")
            .with_status(200)
            .with_body(r#"{"data":{"amount":"2011.07","base":"ETH","currency":"USD"}}"#)
            .create_async()
            .await;

        let adapter = CoinbaseAdapter::new(Some(&server.url()));
        let quote = adapter.get_price("ETH").await.unwrap();
        assert_eq!(quote.price, dec!(2011.07));
    }

    #[tokio::test]
    async fn test_get_price_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/prices/BTC-USD/spot")
            .with_status(200)
            .with_body(r#"{"errors":[{"id":"not_found"}]}"#)
            .create_async()
            .await;

        let adapter = CoinbaseAdapter::new(Some(&server.url()));
        let err = adapter.get_price("BTC").await.unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_sell_requires_auth() {
        let adapter = CoinbaseAdapter::default();
        let err = adapter.place_sell_order("BTC", dec!(1), None).await.unwrap_err();
        assert_eq!(err.kind(), crate::adapters::FailureKind::AuthRequired);
    }
}
