//! Core data types for exchange adapters
//!
//! These types are shared by every venue adapter so that the detector and
//! the orchestrator never see venue-specific payloads.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Market Data
// =============================================================================

/// Last traded price for a symbol on one venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Normalized base asset (e.g. "BTC")
    pub symbol: String,
    /// Price in quote-currency units
    pub price: Decimal,
    /// When the adapter observed the price
    pub observed_at: DateTime<Utc>,
}

impl Quote {
    /// Create a quote observed now
    pub fn new(symbol: impl Into<String>, price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            observed_at: Utc::now(),
        }
    }
}

/// Balance of one currency held on a venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub currency: String,
    pub available: Decimal,
    pub locked: Decimal,
}

impl Balance {
    /// Available plus locked
    pub fn total(&self) -> Decimal {
        self.available + self.locked
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "buy"),
            OrderSide::Sell => write!(f, "sell"),
        }
    }
}

/// Venue-side order lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Filled,
    Canceled,
}

/// Order to place on a venue
///
/// `price: None` means a market order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
}

impl OrderRequest {
    /// Buy order, limit when `price` is set
    pub fn buy(symbol: impl Into<String>, quantity: Decimal, price: Option<Decimal>) -> Self {
        Self {
            symbol: symbol.into(),
            side: OrderSide::Buy,
            quantity,
            price,
        }
    }

    /// Sell order, limit when `price` is set
    pub fn sell(symbol: impl Into<String>, quantity: Decimal, price: Option<Decimal>) -> Self {
        Self {
            symbol: symbol.into(),
            side: OrderSide::Sell,
            quantity,
            price,
        }
    }
}

/// Acknowledgement of a successfully placed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    /// Venue-assigned order reference
    pub order_ref: String,
    pub status: OrderStatus,
}

/// Snapshot of an order as reported by the venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInfo {
    pub order_ref: String,
    pub symbol: String,
    pub side: OrderSide,
    pub price: Option<Decimal>,
    pub quantity: Decimal,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
}
