//! Kraken spot adapter
//!
//! Quotes come from the public `Ticker` endpoint; the last trade price is
//! `c[0]`. Kraken renames pairs (`BTCUSD` answers as `XXBTZUSD`), so the
//! requested key is preferred and a single returned pair is accepted.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::shared::{create_http_client, get_json, parse_price};
use crate::adapters::traits::ExchangeAdapter;
use crate::adapters::types::{Balance, OrderInfo, OrderRequest, OrderResponse, Quote};

pub const KRAKEN_BASE_URL: &str = "https://api.kraken.com/0/public";

#[derive(Debug, Deserialize)]
struct TickerEnvelope {
    #[serde(default)]
    error: Vec<String>,
    #[serde(default)]
    result: HashMap<String, TickerInfo>,
}

#[derive(Debug, Deserialize)]
struct TickerInfo {
    /// Last trade closed: [price, lot volume]
    c: Vec<String>,
}

pub struct KrakenAdapter {
    client: reqwest::Client,
    base_url: String,
}

impl KrakenAdapter {
    pub fn new(base_url: Option<&str>) -> Self {
        Self {
            client: create_http_client("kraken"),
            base_url: base_url
                .unwrap_or(KRAKEN_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
        }
    }

    fn auth_required(&self) -> ExchangeError {
        ExchangeError::AuthRequired(self.exchange_name().to_string())
    }
}

impl Default for KrakenAdapter {
    fn default() -> Self {
        Self::new(None)
    }
}

fn last_price(envelope: TickerEnvelope, pair: &str, symbol: &str) -> ExchangeResult<String> {
    if !envelope.error.is_empty() {
        return Err(ExchangeError::SymbolNotFound(format!(
            "{} ({})",
            symbol,
            envelope.error.join(", ")
        )));
    }

    let mut result = envelope.result;
    let info = match result.remove(pair) {
        Some(info) => info,
        None if result.len() == 1 => result
            .into_values()
            .next()
            .ok_or_else(|| ExchangeError::SymbolNotFound(symbol.to_string()))?,
        None => return Err(ExchangeError::SymbolNotFound(symbol.to_string())),
    };

    info.c
        .into_iter()
        .next()
        .ok_or_else(|| ExchangeError::InvalidResponse(format!("empty ticker for {}", symbol)))
}

#[async_trait]
impl ExchangeAdapter for KrakenAdapter {
    async fn get_price(&self, symbol: &str) -> ExchangeResult<Quote> {
        let pair = format!("{}USD", symbol.to_uppercase());
        let url = format!("{}/Ticker?pair={}", self.base_url, pair);
        let envelope: TickerEnvelope = get_json(&self.client, &url, symbol).await?;
        let raw = last_price(envelope, &pair, symbol)?;
        let price = parse_price(&raw, symbol)?;
        debug!(venue = "kraken", symbol, %price, "[VENUE] Quote received");
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
        "kraken"
    }
}
