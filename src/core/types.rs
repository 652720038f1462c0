//! Core domain types: opportunities and execution records

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::adapters::errors::{ExchangeError, FailureKind};

// =============================================================================
// ArbitrageOpportunity
// =============================================================================

/// A profitable price gap for one symbol between two venues
///
/// `sell_price > buy_price` always holds; the detector never builds one
/// otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArbitrageOpportunity {
    pub symbol: String,
    pub buy_venue: String,
    pub sell_venue: String,
    pub buy_price: Decimal,
    pub sell_price: Decimal,
    pub spread_abs: Decimal,
    pub spread_pct: Decimal,
    pub sized_quantity: Decimal,
    pub potential_profit: Decimal,
    pub profit_margin_pct: Decimal,
    pub detected_at: DateTime<Utc>,
}

impl fmt::Display for ArbitrageOpportunity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} buy@{} {} sell@{} {} margin={}% profit={}",
            self.symbol,
            self.buy_venue,
            self.buy_price,
            self.sell_venue,
            self.sell_price,
            self.profit_margin_pct.round_dp(2),
            self.potential_profit.round_dp(2),
        )
    }
}

// =============================================================================
// Execution status
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Pending,
    /// Buy leg confirmed, sell leg unresolved
    Partial,
    Completed,
    Failed,
}

impl ExecutionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ExecutionStatus::Completed | ExecutionStatus::Failed)
    }

    /// pending → partial → completed; failed from pending or partial
    pub fn can_transition_to(self, next: ExecutionStatus) -> bool {
        use ExecutionStatus::*;
        matches!(
            (self, next),
            (Pending, Partial) | (Pending, Failed) | (Partial, Completed) | (Partial, Failed)
        )
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExecutionStatus::Pending => "pending",
            ExecutionStatus::Partial => "partial",
            ExecutionStatus::Completed => "completed",
            ExecutionStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

// =============================================================================
// Failure detail
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Leg {
    Buy,
    Sell,
    /// Venue lookup, before any order
    Routing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegFailure {
    pub leg: Leg,
    pub kind: FailureKind,
    pub message: String,
}

impl LegFailure {
    pub fn from_exchange(leg: Leg, err: &ExchangeError) -> Self {
        Self {
            leg,
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    pub fn unknown_venue(venue: &str) -> Self {
        Self {
            leg: Leg::Routing,
            kind: FailureKind::UnknownVenue,
            message: format!("Unknown venue: {}", venue),
        }
    }
}

// =============================================================================
// TradeExecution
// =============================================================================

/// Record of one two-leg execution attempt
///
/// Only the orchestrator mutates a record; the mutators below refuse
/// transitions the state machine does not allow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeExecution {
    pub id: String,
    pub symbol: String,
    pub buy_venue: String,
    pub sell_venue: String,
    pub buy_price: Decimal,
    pub sell_price: Decimal,
    pub quantity: Decimal,
    pub buy_order_ref: Option<String>,
    pub sell_order_ref: Option<String>,
    pub status: ExecutionStatus,
    pub profit: Option<Decimal>,
    pub profit_margin_pct: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub failure: Option<LegFailure>,
}

impl TradeExecution {
    pub(crate) fn pending(
        symbol: &str,
        buy_venue: &str,
        sell_venue: &str,
        buy_price: Decimal,
        sell_price: Decimal,
        quantity: Decimal,
    ) -> Self {
        Self {
            id: format!("arb-{}", uuid::Uuid::new_v4()),
            symbol: symbol.to_string(),
            buy_venue: buy_venue.to_string(),
            sell_venue: sell_venue.to_string(),
            buy_price,
            sell_price,
            quantity,
            buy_order_ref: None,
            sell_order_ref: None,
            status: ExecutionStatus::Pending,
            profit: None,
            profit_margin_pct: None,
            created_at: Utc::now(),
            completed_at: None,
            failure: None,
        }
    }

    fn transition(&mut self, next: ExecutionStatus) -> bool {
        if self.status.can_transition_to(next) {
            self.status = next;
            true
        } else {
            false
        }
    }

    pub(crate) fn mark_failed(&mut self, failure: LegFailure) {
        if self.transition(ExecutionStatus::Failed) {
            self.failure = Some(failure);
            self.completed_at = Some(Utc::now());
        }
    }

    pub(crate) fn mark_partial(&mut self, buy_order_ref: String) {
        if self.transition(ExecutionStatus::Partial) {
            self.buy_order_ref = Some(buy_order_ref);
        }
    }

    /// Sell leg failed: stays partial, failure recorded
    pub(crate) fn record_sell_failure(&mut self, failure: LegFailure) {
        if self.status == ExecutionStatus::Partial {
            self.failure = Some(failure);
        }
    }

    pub(crate) fn mark_completed(&mut self, sell_order_ref: String) {
        if !self.transition(ExecutionStatus::Completed) {
            return;
        }
        self.sell_order_ref = Some(sell_order_ref);
        self.completed_at = Some(Utc::now());

        // Out-of-range products leave profit unset; the fills still stand
        let profit = self.quantity.checked_mul(self.sell_price - self.buy_price);
        let committed = self.quantity.checked_mul(self.buy_price);
        self.profit = profit;
        self.profit_margin_pct = match (profit, committed) {
            (Some(profit), Some(committed)) if !committed.is_zero() => profit
                .checked_div(committed)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED)),
            _ => None,
        };
        self.failure = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record() -> TradeExecution {
        TradeExecution::pending("BTC", "a", "b", dec!(100), dec!(102), dec!(2))
    }

    #[test]
    fn test_status_transitions() {
        use ExecutionStatus::*;
        assert!(Pending.can_transition_to(Partial));
        assert!(Pending.can_transition_to(Failed));
        assert!(Partial.can_transition_to(Completed));
        assert!(Partial.can_transition_to(Failed));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Failed));
        assert!(!Failed.can_transition_to(Partial));
        assert!(Completed.is_terminal() && Failed.is_terminal());
        assert!(!Partial.is_terminal());
    }

    #[test]
    fn test_completion_computes_profit() {
        let mut exec = record();
        assert!(exec.id.starts_with("arb-"));
        exec.mark_partial("buy-1".to_string());
        exec.mark_completed("sell-1".to_string());

        assert_eq!(exec.status, ExecutionStatus::Completed);
        assert_eq!(exec.profit, Some(dec!(4)));
        assert_eq!(exec.profit_margin_pct, Some(dec!(2)));
        assert!(exec.completed_at.is_some());
    }

    #[test]
    fn test_completion_survives_profit_overflow() {
        let mut exec =
            TradeExecution::pending("BTC", "a", "b", dec!(1), dec!(3), Decimal::MAX);
        exec.mark_partial("buy-1".to_string());
        exec.mark_completed("sell-1".to_string());

        assert_eq!(exec.status, ExecutionStatus::Completed);
        assert_eq!(exec.sell_order_ref.as_deref(), Some("sell-1"));
        assert!(exec.profit.is_none());
        assert!(exec.profit_margin_pct.is_none());
    }

    #[test]
    fn test_cannot_complete_from_pending() {
        let mut exec = record();
        exec.mark_completed("sell-1".to_string());
        assert_eq!(exec.status, ExecutionStatus::Pending);
        assert!(exec.sell_order_ref.is_none());
    }

    #[test]
    fn test_sell_failure_keeps_partial() {
        let mut exec = record();
        exec.mark_partial("buy-1".to_string());
        exec.record_sell_failure(LegFailure::from_exchange(
            Leg::Sell,
            &ExchangeError::OrderRejected("no liquidity".to_string()),
        ));
        assert_eq!(exec.status, ExecutionStatus::Partial);
        assert_eq!(exec.failure.as_ref().unwrap().kind, FailureKind::OrderRejected);
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut exec = record();
        exec.mark_failed(LegFailure::unknown_venue("nowhere"));
        let json = serde_json::to_value(&exec).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["buyVenue"], "a");
        assert_eq!(json["failure"]["leg"], "routing");
        assert_eq!(json["failure"]["kind"], "unknownVenue");
        assert_eq!(json["buyPrice"], "100");
    }
}
