//! Shared test utilities for adapter testing
//!
//! Provides a configurable `TestMockAdapter` used by the trait, detector and
//! execution test modules.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::traits::ExchangeAdapter;
use crate::adapters::types::{
    Balance, OrderInfo, OrderRequest, OrderResponse, OrderSide, OrderStatus, Quote,
};

/// One order as seen by a mock venue
#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub venue: String,
    pub side: OrderSide,
    pub symbol: String,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
}

/// Order journal that several mocks can share to assert cross-venue ordering
pub type SharedJournal = Arc<Mutex<Vec<JournalEntry>>>;

/// Unified mock adapter for testing
pub struct TestMockAdapter {
    /// Exchange name returned by `exchange_name()`
    pub name: String,
    prices: HashMap<String, Decimal>,
    /// Symbols whose quote fetch fails with a connection error
    failing_symbols: HashSet<String>,
    /// When true, every quote fetch fails
    unavailable: bool,
    buy_error: Option<ExchangeError>,
    sell_error: Option<ExchangeError>,
    /// Counter for quote calls (thread-safe for async tests)
    pub quote_count: Arc<AtomicU64>,
    journal: SharedJournal,
    /// Simulated latency on every call
    latency: Option<std::time::Duration>,
}

impl TestMockAdapter {
    /// Create a new mock adapter with the given exchange name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            prices: HashMap::new(),
            failing_symbols: HashSet::new(),
            unavailable: false,
            buy_error: None,
            sell_error: None,
            quote_count: Arc::new(AtomicU64::new(0)),
            journal: Arc::new(Mutex::new(Vec::new())),
            latency: None,
        }
    }

    pub fn with_price(mut self, symbol: &str, price: Decimal) -> Self {
        self.prices.insert(symbol.to_string(), price);
        self
    }

    pub fn with_quote_failure(mut self, symbol: &str) -> Self {
        self.failing_symbols.insert(symbol.to_string());
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub fn with_buy_error(mut self, err: ExchangeError) -> Self {
        self.buy_error = Some(err);
        self
    }

    pub fn failing_buys(self) -> Self {
        self.with_buy_error(ExchangeError::OrderRejected("Mock failure".to_string()))
    }

    pub fn failing_sells(mut self) -> Self {
        self.sell_error = Some(ExchangeError::OrderRejected("Mock failure".to_string()));
        self
    }

    pub fn with_latency(mut self, latency: std::time::Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn with_journal(mut self, journal: SharedJournal) -> Self {
        self.journal = journal;
        self
    }

    /// Orders this mock (or any mock sharing its journal) accepted or refused
    pub fn journal(&self) -> Vec<JournalEntry> {
        self.journal.lock().map(|j| j.clone()).unwrap_or_default()
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

impl Default for TestMockAdapter {
    fn default() -> Self {
        Self::new("mock")
    }
}

#[async_trait]
impl ExchangeAdapter for TestMockAdapter {
    async fn get_price(&self, symbol: &str) -> ExchangeResult<Quote> {
        self.quote_count.fetch_add(1, Ordering::Relaxed);
        self.simulate_latency().await;

        if self.unavailable || self.failing_symbols.contains(symbol) {
            return Err(ExchangeError::ConnectionFailed(format!(
                "{} unreachable",
                self.name
            )));
        }
        self.prices
            .get(symbol)
            .map(|price| Quote::new(symbol, *price))
            .ok_or_else(|| ExchangeError::SymbolNotFound(symbol.to_string()))
    }

    async fn get_balance(&self) -> ExchangeResult<Vec<Balance>> {
        Ok(Vec::new())
    }

    async fn place_order(&self, order: OrderRequest) -> ExchangeResult<OrderResponse> {
        self.simulate_latency().await;

        if let Ok(mut journal) = self.journal.lock() {
            journal.push(JournalEntry {
                venue: self.name.clone(),
                side: order.side,
                symbol: order.symbol.clone(),
                quantity: order.quantity,
                price: order.price,
            });
        }

        let failure = match order.side {
            OrderSide::Buy => &self.buy_error,
            OrderSide::Sell => &self.sell_error,
        };
        if let Some(err) = failure {
            return Err(err.clone());
        }

        Ok(OrderResponse {
            order_ref: format!("{}-{}-{}", self.name, order.side, order.symbol),
            status: OrderStatus::Filled,
        })
    }

    async fn get_order_status(&self, _order_ref: &str) -> ExchangeResult<Option<OrderInfo>> {
        Ok(None)
    }

    async fn cancel_order(&self, order_ref: &str) -> ExchangeResult<()> {
        Err(ExchangeError::OrderNotFound(order_ref.to_string()))
    }

    fn exchange_name(&self) -> &str {
        &self.name
    }
}
