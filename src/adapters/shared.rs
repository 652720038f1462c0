//! Helpers shared by the REST venue adapters

use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;

use crate::adapters::errors::{ExchangeError, ExchangeResult};

// =============================================================================
// HTTP Client Constants
// =============================================================================

/// HTTP request timeout (seconds); the registry enforces its own deadline on top
const HTTP_TIMEOUT_SECS: u64 = 10;
/// HTTP connection timeout (milliseconds)
const HTTP_CONNECT_TIMEOUT_MS: u64 = 3000;
/// Max idle connections per host in connection pool
const HTTP_POOL_MAX_IDLE: usize = 5;
/// How long idle connections stay in the pool (seconds)
const HTTP_POOL_IDLE_TIMEOUT_SECS: u64 = 60;

/// Create a pooled HTTP client for one venue
pub fn create_http_client(exchange_name: &str) -> reqwest::Client {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .connect_timeout(Duration::from_millis(HTTP_CONNECT_TIMEOUT_MS))
        .pool_max_idle_per_host(HTTP_POOL_MAX_IDLE)
        .pool_idle_timeout(Duration::from_secs(HTTP_POOL_IDLE_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new());
    tracing::debug!(
        phase = "init",
        exchange = %exchange_name,
        timeout_s = HTTP_TIMEOUT_SECS,
        connect_timeout_ms = HTTP_CONNECT_TIMEOUT_MS,
        "HTTP client configured"
    );
    client
}

/// Parse a venue price string into a strictly positive decimal
pub fn parse_price(raw: &str, symbol: &str) -> ExchangeResult<Decimal> {
    let price = Decimal::from_str(raw.trim()).map_err(|e| {
        ExchangeError::InvalidResponse(format!("unparsable price '{}' for {}: {}", raw, symbol, e))
    })?;
    if price <= Decimal::ZERO {
        return Err(ExchangeError::InvalidResponse(format!(
            "non-positive price {} for {}",
            price, symbol
        )));
    }
    Ok(price)
}

/// Send a GET request and decode the JSON body
///
/// 404 becomes `SymbolNotFound`, any other non-success status
/// `InvalidResponse`.
pub async fn get_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    symbol: &str,
) -> ExchangeResult<T> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ExchangeError::SymbolNotFound(symbol.to_string()));
    }
    if !status.is_success() {
        return Err(ExchangeError::InvalidResponse(format!(
            "HTTP {} for {}",
            status, url
        )));
    }
    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| ExchangeError::InvalidResponse(format!("malformed body for {}: {}", symbol, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_price_valid() {
        assert_eq!(parse_price("30000.12345678", "BTC").unwrap(), dec!(30000.12345678));
        assert_eq!(parse_price(" 42 ", "BTC").unwrap(), dec!(42));
    }

    #[test]
    fn test_parse_price_rejects_garbage() {
        let err = parse_price("n/a", "BTC").unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_price_rejects_non_positive() {
        assert!(parse_price("0", "BTC").is_err());
        assert!(parse_price("-1.5", "BTC").is_err());
    }
}
