//! Engine facade
//!
//! `ArbitrageEngine` is the system boundary: detection, execution and
//! ledger queries as plain async methods returning serializable
//! responses. Transport (HTTP, RPC) belongs to whoever embeds it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::adapters::factory::build_registry;
use crate::adapters::registry::VenueRegistry;
use crate::config::{AppConfig, EngineConfig};
use crate::core::detector::OpportunityDetector;
use crate::core::execution::{
    ExecuteRequest, ExecutionError, ExecutionOrchestrator, SettlementDelay, TokioDelay,
};
use crate::core::ledger::{ExecutionStore, InMemoryLedger, LedgerError};
use crate::core::sizing::SizingModel;
use crate::core::stats::Statistics;
use crate::core::types::{ArbitrageOpportunity, ExecutionStatus, TradeExecution};
use crate::error::AppError;

// =============================================================================
// Boundary responses
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectResponse {
    pub opportunities: Vec<ArbitrageOpportunity>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteResponse {
    pub execution: TradeExecution,
    /// `status != failed`
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub executions: Vec<TradeExecution>,
    pub statistics: Statistics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangesResponse {
    pub exchanges: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionLookup {
    pub execution: Option<TradeExecution>,
    pub found: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolExecutions {
    pub executions: Vec<TradeExecution>,
    pub count: usize,
}

// =============================================================================
// ArbitrageEngine
// =============================================================================

pub struct ArbitrageEngine {
    registry: Arc<VenueRegistry>,
    detector: OpportunityDetector,
    orchestrator: ExecutionOrchestrator,
    ledger: Arc<dyn ExecutionStore>,
}

impl ArbitrageEngine {
    /// Engine over an existing registry with an in-memory ledger and a real
    /// settlement wait
    pub fn new(registry: Arc<VenueRegistry>, config: &EngineConfig) -> Result<Self, AppError> {
        Self::with_parts(
            registry,
            config,
            Arc::new(InMemoryLedger::new()),
            Arc::new(TokioDelay),
        )
    }

    /// Build venues from the configuration file, then the engine
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let registry = build_registry(config)?;
        Self::new(Arc::new(registry), &config.engine)
    }

    pub fn with_parts(
        registry: Arc<VenueRegistry>,
        config: &EngineConfig,
        ledger: Arc<dyn ExecutionStore>,
        delay: Arc<dyn SettlementDelay>,
    ) -> Result<Self, AppError> {
        config.validate()?;
        let sizing = SizingModel::new(config.max_trade_amount)?;

        let detector = OpportunityDetector::new(
            Arc::clone(&registry),
            sizing,
            config.min_profit_margin_pct,
        );
        let orchestrator = ExecutionOrchestrator::new(
            Arc::clone(&registry),
            Arc::clone(&ledger),
            delay,
            config.settlement_delay(),
        );

        info!(
            venues = registry.len(),
            min_profit_margin_pct = %config.min_profit_margin_pct,
            max_trade_amount = %config.max_trade_amount,
            "Arbitrage engine ready"
        );

        Ok(Self {
            registry,
            detector,
            orchestrator,
            ledger,
        })
    }

    pub async fn detect(&self, symbols: &[String]) -> DetectResponse {
        let opportunities = self.detector.detect(symbols).await;
        DetectResponse {
            count: opportunities.len(),
            opportunities,
        }
    }

    pub async fn execute(&self, request: ExecuteRequest) -> Result<ExecuteResponse, ExecutionError> {
        let execution = self.orchestrator.execute(request).await?;
        Ok(ExecuteResponse {
            success: execution.status != ExecutionStatus::Failed,
            execution,
        })
    }

    pub async fn statistics(&self) -> Result<Statistics, LedgerError> {
        let executions = self.ledger.list_all().await?;
        Ok(Statistics::from_executions(&executions))
    }

    pub async fn history(&self) -> Result<HistoryResponse, LedgerError> {
        let executions = self.ledger.list_all().await?;
        Ok(HistoryResponse {
            statistics: Statistics::from_executions(&executions),
            executions,
        })
    }

    pub fn exchanges(&self) -> ExchangesResponse {
        let exchanges = self.registry.names();
        ExchangesResponse {
            count: exchanges.len(),
            exchanges,
        }
    }

    pub async fn execution(&self, id: &str) -> Result<ExecutionLookup, LedgerError> {
        let execution = self.ledger.get(id).await?;
        Ok(ExecutionLookup {
            found: execution.is_some(),
            execution,
        })
    }

    pub async fn executions_by_symbol(&self, symbol: &str) -> Result<SymbolExecutions, LedgerError> {
        let executions = self.ledger.list_by_symbol(symbol.trim()).await?;
        Ok(SymbolExecutions {
            count: executions.len(),
            executions,
        })
    }

    pub async fn executions_by_status(
        &self,
        status: ExecutionStatus,
    ) -> Result<Vec<TradeExecution>, LedgerError> {
        self.ledger.list_by_status(status).await
    }

    pub fn min_profit_margin_pct(&self) -> rust_decimal::Decimal {
        self.detector.min_profit_margin_pct()
    }
}
