//! Two-leg execution orchestrator
//!
//! Drives one arbitrage trade through `pending → partial → completed`
//! (or `failed`):
//!
//! 1. Validate the request; invalid requests never create a record.
//! 2. Resolve both venues; an unknown venue fails the record immediately.
//! 3. Buy leg. Failure ⇒ `failed`, the sell leg is never attempted.
//! 4. Buy confirmed ⇒ `partial`, then wait the settlement delay.
//! 5. Sell leg. Failure ⇒ stays `partial`. Success ⇒ `completed` with profit.
//!
//! Legs run strictly in sequence. There is no retry: a `partial` record is
//! left for the operator.
//!
//! # Architecture
//! - `ExecutionOrchestrator`: the state machine above
//! - `SettlementDelay`: injectable wait between the legs
//! - `ExecuteRequest`: caller input, usually built from an opportunity

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::adapters::registry::VenueRegistry;
use crate::adapters::traits::ExchangeAdapter;
use crate::core::ledger::ExecutionStore;
use crate::core::types::{ArbitrageOpportunity, Leg, LegFailure, TradeExecution};

// =============================================================================
// Errors & requests
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// Rejected before any record was created
    #[error("Invalid opportunity: {0}")]
    InvalidOpportunity(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    pub symbol: String,
    pub buy_venue: String,
    pub sell_venue: String,
    pub buy_price: Decimal,
    pub sell_price: Decimal,
    pub quantity: Decimal,
}

impl ExecuteRequest {
    fn validate(&self) -> Result<(), ExecutionError> {
        let invalid = |reason: String| Err(ExecutionError::InvalidOpportunity(reason));

        if self.symbol.trim().is_empty() {
            return invalid("symbol is empty".to_string());
        }
        if self.quantity <= Decimal::ZERO {
            return invalid(format!("quantity must be > 0 (got {})", self.quantity));
        }
        if self.buy_price <= Decimal::ZERO {
            return invalid(format!("buy price must be > 0 (got {})", self.buy_price));
        }
        if self.sell_price <= self.buy_price {
            return invalid(format!(
                "sell price {} must exceed buy price {}",
                self.sell_price, self.buy_price
            ));
        }
        if self.buy_venue.trim().eq_ignore_ascii_case(self.sell_venue.trim()) {
            return invalid(format!(
                "buy and sell venue are both '{}'",
                self.buy_venue
            ));
        }
        Ok(())
    }
}

impl From<&ArbitrageOpportunity> for ExecuteRequest {
    fn from(opp: &ArbitrageOpportunity) -> Self {
        Self {
            symbol: opp.symbol.clone(),
            buy_venue: opp.buy_venue.clone(),
            sell_venue: opp.sell_venue.clone(),
            buy_price: opp.buy_price,
            sell_price: opp.sell_price,
            quantity: opp.sized_quantity,
        }
    }
}

// =============================================================================
// Settlement delay
// =============================================================================

/// Wait between a confirmed buy and the sell leg
#[async_trait]
pub trait SettlementDelay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// Real wall-clock wait
pub struct TokioDelay;

#[async_trait]
impl SettlementDelay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Returns immediately
pub struct NoDelay;

#[async_trait]
impl SettlementDelay for NoDelay {
    async fn wait(&self, _duration: Duration) {}
}

// =============================================================================
// ExecutionOrchestrator
// =============================================================================

pub struct ExecutionOrchestrator {
    registry: Arc<VenueRegistry>,
    ledger: Arc<dyn ExecutionStore>,
    delay: Arc<dyn SettlementDelay>,
    settlement_delay: Duration,
}

impl ExecutionOrchestrator {
    pub fn new(
        registry: Arc<VenueRegistry>,
        ledger: Arc<dyn ExecutionStore>,
        delay: Arc<dyn SettlementDelay>,
        settlement_delay: Duration,
    ) -> Self {
        Self {
            registry,
            ledger,
            delay,
            settlement_delay,
        }
    }

    /// Run one execution to its final state and record it
    ///
    /// # Returns
    /// * `Ok(TradeExecution)` - the recorded outcome, including failed and
    ///   partial ones
    /// * `Err(ExecutionError)` - the request was rejected; nothing recorded
    pub async fn execute(&self, request: ExecuteRequest) -> Result<TradeExecution, ExecutionError> {
        request.validate()?;

        let symbol = request.symbol.trim().to_uppercase();
        let exec = TradeExecution::pending(
            &symbol,
            request.buy_venue.trim(),
            request.sell_venue.trim(),
            request.buy_price,
            request.sell_price,
            request.quantity,
        );
        info!(
            id = %exec.id,
            symbol = %exec.symbol,
            buy_venue = %exec.buy_venue,
            sell_venue = %exec.sell_venue,
            quantity = %exec.quantity,
            "[TRADE] Execution started"
        );

        // Everything from here may commit capital: the workflow runs detached
        // so a dropped caller cannot abandon it between the legs.
        let snapshot = exec.clone();
        let workflow = tokio::spawn(run_legs(
            exec,
            Arc::clone(&self.registry),
            Arc::clone(&self.ledger),
            Arc::clone(&self.delay),
            self.settlement_delay,
        ));

        match workflow.await {
            Ok(exec) => Ok(exec),
            Err(e) => {
                error!(id = %snapshot.id, error = %e, "[TRADE] Execution task aborted");
                record(self.ledger.as_ref(), &snapshot).await;
                Ok(snapshot)
            }
        }
    }
}

async fn run_legs(
    mut exec: TradeExecution,
    registry: Arc<VenueRegistry>,
    ledger: Arc<dyn ExecutionStore>,
    delay: Arc<dyn SettlementDelay>,
    settlement_delay: Duration,
) -> TradeExecution {
    let (buy, sell) = match (registry.get(&exec.buy_venue), registry.get(&exec.sell_venue)) {
        (Some(buy), Some(sell)) => (buy, sell),
        (buy, _) => {
            let missing = if buy.is_none() {
                exec.buy_venue.clone()
            } else {
                exec.sell_venue.clone()
            };
            warn!(id = %exec.id, venue = %missing, "[TRADE] Unknown venue - no order placed");
            exec.mark_failed(LegFailure::unknown_venue(&missing));
            record(ledger.as_ref(), &exec).await;
            return exec;
        }
    };

    match buy
        .place_buy_order(&exec.symbol, exec.quantity, Some(exec.buy_price))
        .await
    {
        Ok(response) => {
            info!(
                id = %exec.id,
                order_ref = %response.order_ref,
                venue = %exec.buy_venue,
                "[TRADE] Buy leg filled"
            );
            exec.mark_partial(response.order_ref);
        }
        Err(e) => {
            warn!(
                id = %exec.id,
                venue = %exec.buy_venue,
                error = %e,
                "[TRADE] Buy leg failed - sell leg skipped"
            );
            exec.mark_failed(LegFailure::from_exchange(Leg::Buy, &e));
            record(ledger.as_ref(), &exec).await;
            return exec;
        }
    }

    delay.wait(settlement_delay).await;
    let exec = sell_leg(exec, sell.as_ref()).await;
    record(ledger.as_ref(), &exec).await;
    exec
}

async fn sell_leg(mut exec: TradeExecution, sell: &dyn ExchangeAdapter) -> TradeExecution {
    match sell
        .place_sell_order(&exec.symbol, exec.quantity, Some(exec.sell_price))
        .await
    {
        Ok(response) => {
            exec.mark_completed(response.order_ref);
            info!(
                id = %exec.id,
                symbol = %exec.symbol,
                profit = %exec.profit.unwrap_or_default().round_dp(8),
                margin_pct = %exec.profit_margin_pct.unwrap_or_default().round_dp(2),
                "[TRADE] Execution completed"
            );
        }
        Err(e) => {
            warn!(
                id = %exec.id,
                venue = %exec.sell_venue,
                buy_order_ref = exec.buy_order_ref.as_deref().unwrap_or_default(),
                error = %e,
                "[TRADE] Sell leg failed - execution left partial, manual resolution required"
            );
            exec.record_sell_failure(LegFailure::from_exchange(Leg::Sell, &e));
        }
    }
    exec
}

async fn record(ledger: &dyn ExecutionStore, exec: &TradeExecution) {
    if let Err(e) = ledger.insert(exec.clone()).await {
        error!(id = %exec.id, error = %e, "[TRADE] Failed to record execution");
    }
}
