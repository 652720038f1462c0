//! Exchange adapter error types
//!
//! Every venue call returns an `ExchangeResult`. Expected failure modes
//! (network trouble, missing credentials, rejected orders) are values the
//! caller inspects, never panics.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Exchange-specific error types for adapter operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// Venue could not be reached
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Network operation timed out
    #[error("Network timeout after {0}ms")]
    NetworkTimeout(u64),

    /// Invalid or unexpected response from exchange
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Venue does not list the requested symbol
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Operation needs signed credentials the adapter does not hold
    #[error("Authentication required for {0}")]
    AuthRequired(String),

    /// Order was refused by the venue
    #[error("Order rejected: {0}")]
    OrderRejected(String),

    /// Order reference unknown to the venue
    #[error("Order not found: {0}")]
    OrderNotFound(String),
}

impl ExchangeError {
    /// Classify the error for attachment to execution records
    pub fn kind(&self) -> FailureKind {
        match self {
            ExchangeError::ConnectionFailed(_) => FailureKind::VenueUnavailable,
            ExchangeError::NetworkTimeout(_) => FailureKind::Timeout,
            ExchangeError::InvalidResponse(_) | ExchangeError::SymbolNotFound(_) => {
                FailureKind::InvalidResponse
            }
            ExchangeError::AuthRequired(_) => FailureKind::AuthRequired,
            ExchangeError::OrderRejected(_) | ExchangeError::OrderNotFound(_) => {
                FailureKind::OrderRejected
            }
        }
    }
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // reqwest does not expose the configured duration
            ExchangeError::NetworkTimeout(0)
        } else if err.is_decode() {
            ExchangeError::InvalidResponse(err.to_string())
        } else {
            ExchangeError::ConnectionFailed(err.to_string())
        }
    }
}

/// Serializable classification of a venue-call failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    /// Network error or venue down
    VenueUnavailable,
    /// Call exceeded its deadline
    Timeout,
    /// Credentials missing or refused
    AuthRequired,
    /// Venue refused the order
    OrderRejected,
    /// Venue answered with something unusable
    InvalidResponse,
    /// Execution referenced a venue that is not registered
    UnknownVenue,
}

/// Result type alias for exchange operations
pub type ExchangeResult<T> = std::result::Result<T, ExchangeError>;
