//! Application-wide error types using thiserror
//!
//! Module-level errors convert into AppError with `?` so the binary and
//! construction code share one error type.

use thiserror::Error;

use crate::adapters::errors::ExchangeError;
use crate::core::execution::ExecutionError;
use crate::core::ledger::LedgerError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Exchange error: {0}")]
    Exchange(#[from] ExchangeError),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_error_converts() {
        fn fails() -> Result<()> {
            Err(ExchangeError::SymbolNotFound("DOGE".to_string()))?
        }
        let err = fails().unwrap_err();
        assert!(matches!(err, AppError::Exchange(_)));
        assert_eq!(err.to_string(), "Exchange error: Symbol not found: DOGE");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: AppError = io.into();
        assert!(err.to_string().starts_with("IO error"));
    }
}
