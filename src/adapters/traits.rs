//! Exchange adapter trait definition
//!
//! The ExchangeAdapter trait is the uniform capability every venue offers:
//! quotes, balances and order placement/status/cancel.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::adapters::errors::ExchangeResult;
use crate::adapters::types::{Balance, OrderInfo, OrderRequest, OrderResponse, Quote};

/// Common trait for all exchange adapters
///
/// Implementations must never panic on venue trouble: every failure is an
/// `ExchangeError` value.
///
/// # Example Implementation
///
/// ```ignore
/// use async_trait::async_trait;
///
/// struct BitstampAdapter {
///     client: reqwest::Client,
/// }
///
/// #[async_trait]
/// impl ExchangeAdapter for BitstampAdapter {
///     async fn get_price(&self, symbol: &str) -> ExchangeResult<Quote> {
///         // GET /api/v2/ticker/{symbol}usd
///     }
///     // ... other methods
/// }
/// ```
#[async_trait]
pub trait ExchangeAdapter: Send + Sync {
    /// Fetch the latest price for one symbol
    ///
    /// # Arguments
    /// * `symbol` - Normalized base asset (e.g., "BTC")
    async fn get_price(&self, symbol: &str) -> ExchangeResult<Quote>;

    /// Fetch prices for several symbols
    ///
    /// The returned vector is aligned with `symbols`: entry `i` is the
    /// outcome for `symbols[i]`, so one failing symbol never hides the
    /// others. The default implementation fetches sequentially.
    async fn get_prices(&self, symbols: &[String]) -> Vec<ExchangeResult<Quote>> {
        let mut quotes = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            quotes.push(self.get_price(symbol).await);
        }
        quotes
    }

    /// Fetch account balances
    async fn get_balance(&self) -> ExchangeResult<Vec<Balance>>;

    /// Place an order on the exchange
    ///
    /// # Returns
    /// Order response with the venue-assigned order reference
    async fn place_order(&self, order: OrderRequest) -> ExchangeResult<OrderResponse>;

    /// Place a buy order, limit when `price` is set
    async fn place_buy_order(
        &self,
        symbol: &str,
        quantity: Decimal,
        price: Option<Decimal>,
    ) -> ExchangeResult<OrderResponse> {
        self.place_order(OrderRequest::buy(symbol, quantity, price))
            .await
    }

    /// Place a sell order, limit when `price` is set
    async fn place_sell_order(
        &self,
        symbol: &str,
        quantity: Decimal,
        price: Option<Decimal>,
    ) -> ExchangeResult<OrderResponse> {
        self.place_order(OrderRequest::sell(symbol, quantity, price))
            .await
    }

    /// Look up an order by its venue reference
    ///
    /// # Returns
    /// * `Ok(Some(OrderInfo))` - Order known to the venue
    /// * `Ok(None)` - No such order
    /// * `Err(...)` - Exchange error occurred
    async fn get_order_status(&self, order_ref: &str) -> ExchangeResult<Option<OrderInfo>>;

    /// Cancel an existing order
    async fn cancel_order(&self, order_ref: &str) -> ExchangeResult<()>;

    /// Get the exchange name identifier (e.g. "binance")
    fn exchange_name(&self) -> &str;
}

/// Shared adapters stay usable by the caller after registration
#[async_trait]
impl<T: ExchangeAdapter + ?Sized> ExchangeAdapter for Arc<T> {
    async fn get_price(&self, symbol: &str) -> ExchangeResult<Quote> {
        (**self).get_price(symbol).await
    }

    async fn get_prices(&self, symbols: &[String]) -> Vec<ExchangeResult<Quote>> {
        (**self).get_prices(symbols).await
    }

    async fn get_balance(&self) -> ExchangeResult<Vec<Balance>> {
        (**self).get_balance().await
    }

    async fn place_order(&self, order: OrderRequest) -> ExchangeResult<OrderResponse> {
        (**self).place_order(order).await
    }

    async fn get_order_status(&self, order_ref: &str) -> ExchangeResult<Option<OrderInfo>> {
        (**self).get_order_status(order_ref).await
    }

    async fn cancel_order(&self, order_ref: &str) -> ExchangeResult<()> {
        (**self).cancel_order(order_ref).await
    }

    fn exchange_name(&self) -> &str {
        (**self).exchange_name()
    }
}
