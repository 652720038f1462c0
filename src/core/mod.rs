//! Core module - detection, sizing, execution, ledger and statistics
//!
//! This module uses **explicit re-exports** instead of glob exports
//! (`pub use module::*`), so additions to the public API are deliberate.
//!
//! ## Usage
//! ```ignore
//! use arb_engine::core::{ArbitrageEngine, ExecuteRequest, ExecutionStatus};
//! ```

pub mod detector;
pub mod engine;
pub mod execution;
pub mod ledger;
pub mod scanner;
pub mod sizing;
pub mod stats;
pub mod types;

// Explicit re-exports for types module
pub use types::{ArbitrageOpportunity, ExecutionStatus, Leg, LegFailure, TradeExecution};

// Explicit re-exports for detection and sizing
pub use detector::{rank, OpportunityDetector, QuoteMatrix};
pub use sizing::{Sizing, SizingModel};

// Explicit re-exports for execution module
pub use execution::{
    ExecuteRequest, ExecutionError, ExecutionOrchestrator, NoDelay, SettlementDelay, TokioDelay,
};

// Explicit re-exports for ledger and statistics
pub use ledger::{ExecutionStore, InMemoryLedger, LedgerError};
pub use stats::Statistics;

// Explicit re-exports for engine facade
pub use engine::{
    ArbitrageEngine, DetectResponse, ExchangesResponse, ExecuteResponse, ExecutionLookup,
    HistoryResponse, SymbolExecutions,
};

pub use scanner::scan_task;
