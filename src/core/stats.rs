//! Aggregate statistics over the ledger
//!
//! Computed on demand from a snapshot of records; nothing is cached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::types::{ExecutionStatus, TradeExecution};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_executions: usize,
    pub completed_executions: usize,
    pub failed_executions: usize,
    pub partial_executions: usize,
    /// Sum of profit over completed executions
    pub total_profit: Decimal,
    /// Mean profit margin over completed executions, 0 if none
    pub average_profit_margin: Decimal,
    /// completed / total * 100, 0 if the ledger is empty
    pub success_rate: Decimal,
}

impl Statistics {
    pub fn from_executions(executions: &[TradeExecution]) -> Self {
        let mut stats = Statistics {
            total_executions: executions.len(),
            ..Default::default()
        };
        let mut margin_sum = Decimal::ZERO;

        for exec in executions {
            match exec.status {
                ExecutionStatus::Completed => {
                    stats.completed_executions += 1;
                    stats.total_profit += exec.profit.unwrap_or_default();
                    margin_sum += exec.profit_margin_pct.unwrap_or_default();
                }
                ExecutionStatus::Failed => stats.failed_executions += 1,
                ExecutionStatus::Partial => stats.partial_executions += 1,
                ExecutionStatus::Pending => {}
            }
        }

        if stats.completed_executions > 0 {
            let completed = Decimal::from(stats.completed_executions);
            stats.average_profit_margin = margin_sum / completed;
            stats.success_rate =
                completed / Decimal::from(stats.total_executions) * Decimal::ONE_HUNDRED;
        }

        stats
    }
}
