//! In-memory venue for paper trading and integration tests
//!
//! Orders fill immediately at their limit price. Failure modes can be
//! switched on at runtime to rehearse outages and rejections.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::debug;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::traits::ExchangeAdapter;
use crate::adapters::types::{
    Balance, OrderInfo, OrderRequest, OrderResponse, OrderSide, OrderStatus, Quote,
};

/// Simulated exchange with scripted quotes and immediate fills
pub struct SimulatedAdapter {
    name: String,
    prices: RwLock<HashMap<String, Decimal>>,
    balances: RwLock<Vec<Balance>>,
    orders: RwLock<HashMap<String, OrderInfo>>,
    /// Insertion-ordered order refs, for `orders_placed`
    order_log: RwLock<Vec<String>>,
    failing_symbols: RwLock<HashSet<String>>,
    unavailable: AtomicBool,
    reject_buys: AtomicBool,
    reject_sells: AtomicBool,
    latency: Option<Duration>,
    next_order_id: AtomicU64,
}

impl SimulatedAdapter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_lowercase(),
            prices: RwLock::new(HashMap::new()),
            balances: RwLock::new(Vec::new()),
            orders: RwLock::new(HashMap::new()),
            order_log: RwLock::new(Vec::new()),
            failing_symbols: RwLock::new(HashSet::new()),
            unavailable: AtomicBool::new(false),
            reject_buys: AtomicBool::new(false),
            reject_sells: AtomicBool::new(false),
            latency: None,
            next_order_id: AtomicU64::new(1),
        }
    }

    /// Seed quotes before the adapter is shared
    pub fn with_prices<I, S>(self, prices: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        let map = prices
            .into_iter()
            .map(|(symbol, price)| (symbol.into(), price))
            .collect();
        Self {
            prices: RwLock::new(map),
            ..self
        }
    }

    pub fn with_balances(self, balances: Vec<Balance>) -> Self {
        Self {
            balances: RwLock::new(balances),
            ..self
        }
    }

    /// Delay applied to every call
    pub fn with_latency(self, latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..self
        }
    }

    pub async fn set_price(&self, symbol: &str, price: Decimal) {
        self.prices.write().await.insert(symbol.to_string(), price);
    }

    /// Make quote fetches for `symbol` fail (or succeed again)
    pub async fn set_symbol_failing(&self, symbol: &str, failing: bool) {
        let mut failing_symbols = self.failing_symbols.write().await;
        if failing {
            failing_symbols.insert(symbol.to_string());
        } else {
            failing_symbols.remove(symbol);
        }
    }

    /// Take the whole venue offline for quotes
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn set_reject_buys(&self, reject: bool) {
        self.reject_buys.store(reject, Ordering::SeqCst);
    }

    pub fn set_reject_sells(&self, reject: bool) {
        self.reject_sells.store(reject, Ordering::SeqCst);
    }

    /// Orders accepted so far, oldest first
    pub async fn orders_placed(&self) -> Vec<OrderInfo> {
        let log = self.order_log.read().await;
        let orders = self.orders.read().await;
        log.iter().filter_map(|id| orders.get(id).cloned()).collect()
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn rejects(&self, side: OrderSide) -> bool {
        match side {
            OrderSide::Buy => self.reject_buys.load(Ordering::SeqCst),
            OrderSide::Sell => self.reject_sells.load(Ordering::SeqCst),
        }
    }
}

#[async_trait]
impl ExchangeAdapter for SimulatedAdapter {
    async fn get_price(&self, symbol: &str) -> ExchangeResult<Quote> {
        self.simulate_latency().await;

        if self.unavailable.load(Ordering::SeqCst)
            || self.failing_symbols.read().await.contains(symbol)
        {
            return Err(ExchangeError::ConnectionFailed(format!(
                "{} is unavailable",
                self.name
            )));
        }

        self.prices
            .read()
            .await
            .get(symbol)
            .map(|price| Quote::new(symbol, *price))
            .ok_or_else(|| ExchangeError::SymbolNotFound(symbol.to_string()))
    }

    async fn get_balance(&self) -> ExchangeResult<Vec<Balance>> {
        self.simulate_latency().await;
        Ok(self.balances.read().await.clone())
    }

    async fn place_order(&self, order: OrderRequest) -> ExchangeResult<OrderResponse> {
        self.simulate_latency().await;

        if order.quantity <= Decimal::ZERO {
            return Err(ExchangeError::OrderRejected(format!(
                "non-positive quantity {}",
                order.quantity
            )));
        }
        if self.rejects(order.side) {
            return Err(ExchangeError::OrderRejected(format!(
                "{} rejected {} order for {}",
                self.name, order.side, order.symbol
            )));
        }

        let order_ref = format!(
            "{}-{}",
            self.name,
            self.next_order_id.fetch_add(1, Ordering::SeqCst)
        );
        let info = OrderInfo {
            order_ref: order_ref.clone(),
            symbol: order.symbol,
            side: order.side,
            price: order.price,
            quantity: order.quantity,
            status: OrderStatus::Filled,
            placed_at: Utc::now(),
        };
        debug!(
            venue = %self.name,
            order_ref = %order_ref,
            side = %info.side,
            symbol = %info.symbol,
            quantity = %info.quantity,
            "[VENUE] Simulated fill"
        );

        self.orders.write().await.insert(order_ref.clone(), info);
        self.order_log.write().await.push(order_ref.clone());

        Ok(OrderResponse {
            order_ref,
            status: OrderStatus::Filled,
        })
    }

    async fn get_order_status(&self, order_ref: &str) -> ExchangeResult<Option<OrderInfo>> {
        self.simulate_latency().await;
        Ok(self.orders.read().await.get(order_ref).cloned())
    }

    async fn cancel_order(&self, order_ref: &str) -> ExchangeResult<()> {
        self.simulate_latency().await;
        let mut orders = self.orders.write().await;
        match orders.get_mut(order_ref) {
            None => Err(ExchangeError::OrderNotFound(order_ref.to_string())),
            Some(order) if order.status == OrderStatus::Pending => {
                order.status = OrderStatus::Canceled;
                Ok(())
            }
            Some(order) => Err(ExchangeError::OrderRejected(format!(
                "order {} is {:?} and cannot be canceled",
                order_ref, order.status
            ))),
        }
    }

    fn exchange_name(&self) -> &str {
        &self.name
    }
}
