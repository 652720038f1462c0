//! Deadline enforcement for venue calls
//!
//! `TimedAdapter` wraps any adapter and bounds every call with
//! `tokio::time::timeout`. An expired call becomes
//! `ExchangeError::NetworkTimeout`, so callers treat it like any other
//! venue failure.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::traits::ExchangeAdapter;
use crate::adapters::types::{Balance, OrderInfo, OrderRequest, OrderResponse, Quote};

/// Adapter decorator enforcing a per-call timeout
pub struct TimedAdapter<A: ?Sized> {
    timeout: Duration,
    inner: Box<A>,
}

impl<A: ExchangeAdapter + ?Sized> TimedAdapter<A> {
    pub fn new(inner: Box<A>, timeout: Duration) -> Self {
        Self { timeout, inner }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> ExchangeResult<T>
    where
        F: Future<Output = ExchangeResult<T>> + Send,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                let ms = self.timeout.as_millis() as u64;
                warn!(
                    venue = %self.inner.exchange_name(),
                    operation,
                    timeout_ms = ms,
                    "[VENUE] Call timed out"
                );
                Err(ExchangeError::NetworkTimeout(ms))
            }
        }
    }
}

// `get_prices` keeps the trait default so each symbol gets its own deadline.
#[async_trait]
impl<A: ExchangeAdapter + ?Sized> ExchangeAdapter for TimedAdapter<A> {
    async fn get_price(&self, symbol: &str) -> ExchangeResult<Quote> {
        self.bounded("get_price", self.inner.get_price(symbol)).await
    }

    async fn get_balance(&self) -> ExchangeResult<Vec<Balance>> {
        self.bounded("get_balance", self.inner.get_balance()).await
    }

    async fn place_order(&self, order: OrderRequest) -> ExchangeResult<OrderResponse> {
        self.bounded("place_order", self.inner.place_order(order)).await
    }

    async fn get_order_status(&self, order_ref: &str) -> ExchangeResult<Option<OrderInfo>> {
        self.bounded("get_order_status", self.inner.get_order_status(order_ref))
            .await
    }

    async fn cancel_order(&self, order_ref: &str) -> ExchangeResult<()> {
        self.bounded("cancel_order", self.inner.cancel_order(order_ref))
            .await
    }

    fn exchange_name(&self) -> &str {
        self.inner.exchange_name()
    }
}
