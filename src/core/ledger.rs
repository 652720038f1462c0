//! Execution ledger
//!
//! Append-only store of `TradeExecution` records. The orchestrator is the
//! only writer; statistics and history queries only read. `ExecutionStore`
//! is the seam for swapping in a durable backend.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::core::types::{ExecutionStatus, TradeExecution};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Execution {0} already recorded")]
    DuplicateId(String),

    #[error("Ledger backend error: {0}")]
    Backend(String),
}

/// Storage operations for execution records
#[async_trait]
pub trait ExecutionStore: Send + Sync {
    /// Append a record. Ids are unique; an existing id is an error.
    async fn insert(&self, execution: TradeExecution) -> Result<(), LedgerError>;

    async fn get(&self, id: &str) -> Result<Option<TradeExecution>, LedgerError>;

    /// All records in insertion order
    async fn list_all(&self) -> Result<Vec<TradeExecution>, LedgerError>;

    async fn list_by_symbol(&self, symbol: &str) -> Result<Vec<TradeExecution>, LedgerError>;

    async fn list_by_status(
        &self,
        status: ExecutionStatus,
    ) -> Result<Vec<TradeExecution>, LedgerError>;
}

#[derive(Default)]
struct LedgerInner {
    records: Vec<TradeExecution>,
    by_id: HashMap<String, usize>,
}

/// Process-lifetime ledger behind a tokio `RwLock`
#[derive(Default)]
pub struct InMemoryLedger {
    inner: RwLock<LedgerInner>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }

    async fn filtered<F>(&self, keep: F) -> Vec<TradeExecution>
    where
        F: Fn(&TradeExecution) -> bool + Send,
    {
        self.inner
            .read()
            .await
            .records
            .iter()
            .filter(|e| keep(*e))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ExecutionStore for InMemoryLedger {
    async fn insert(&self, execution: TradeExecution) -> Result<(), LedgerError> {
        let mut inner = self.inner.write().await;
        if inner.by_id.contains_key(&execution.id) {
            return Err(LedgerError::DuplicateId(execution.id));
        }
        let index = inner.records.len();
        inner.by_id.insert(execution.id.clone(), index);
        inner.records.push(execution);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<TradeExecution>, LedgerError> {
        let inner = self.inner.read().await;
        Ok(inner.by_id.get(id).map(|&i| inner.records[i].clone()))
    }

    async fn list_all(&self) -> Result<Vec<TradeExecution>, LedgerError> {
        Ok(self.inner.read().await.records.clone())
    }

    async fn list_by_symbol(&self, symbol: &str) -> Result<Vec<TradeExecution>, LedgerError> {
        Ok(self
            .filtered(|e| e.symbol.eq_ignore_ascii_case(symbol))
            .await)
    }

    async fn list_by_status(
        &self,
        status: ExecutionStatus,
    ) -> Result<Vec<TradeExecution>, LedgerError> {
        Ok(self.filtered(|e| e.status == status).await)
    }
}
