//! Configuration loader for YAML files
//!
//! This module handles loading and validating configuration from YAML files.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::AppError;

use super::types::AppConfig;

/// Load configuration from a YAML file
///
/// This function:
/// 1. Checks if the file exists
/// 2. Parses the YAML content
/// 3. Validates the configuration rules
///
/// # Example
/// ```ignore
/// use std::path::Path;
/// use arb_engine::config::load_config;
///
/// let config = load_config(Path::new("config.yaml"))?;
/// ```
pub fn load_config(path: &Path) -> Result<AppConfig, AppError> {
    if !path.exists() {
        return Err(AppError::Config(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let config: AppConfig = serde_yaml::from_reader(reader).map_err(|e| {
        AppError::Config(format!(
            "YAML parse error in '{}': {}",
            path.display(),
            e
        ))
    })?;

    config.validate()?;

    Ok(config)
}

/// Load configuration from a YAML string (useful for testing)
pub fn load_config_from_str(yaml_content: &str) -> Result<AppConfig, AppError> {
    let config: AppConfig = serde_yaml::from_str(yaml_content)
        .map_err(|e| AppError::Config(format!("YAML parse error: {}", e)))?;

    config.validate()?;

    Ok(config)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VenueKind;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VALID_CONFIG_YAML: &str = r#"
engine:
  min_profit_margin_pct: 0.75
  max_trade_amount: 2500
  settlement_delay_ms: 200
  venue_timeout_ms: 3000
venues:
  - kind: binance
  - kind: kraken
    base_url: https://kraken.example.test/0/public
  - kind: simulated
    name: paper
    prices:
      BTC: 30300.5
scanner:
  symbols: [BTC, ETH]
  interval_ms: 10000
  auto_execute: true
"#;

    #[test]
    fn test_load_config_from_str_valid() {
        let config = load_config_from_str(VALID_CONFIG_YAML).unwrap();
        assert_eq!(config.engine.min_profit_margin_pct, dec!(0.75));
        assert_eq!(config.engine.max_trade_amount, dec!(2500));
        assert_eq!(config.venues.len(), 3);
        assert_eq!(config.venues[1].kind, VenueKind::Kraken);
        assert_eq!(config.venues[2].registration_name(), "paper");
        assert_eq!(config.venues[2].prices["BTC"], dec!(30300.5));
        assert_eq!(config.scanner.symbols, vec!["BTC", "ETH"]);
        assert!(config.scanner.auto_execute);
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = load_config_from_str("venues:\n  - kind: coinbase\n").unwrap();
        assert_eq!(config.engine.min_profit_margin_pct, dec!(0.5));
        assert_eq!(config.engine.max_trade_amount, dec!(1000));
        assert!(config.venues[0].enabled);
        assert!(config.scanner.symbols.is_empty());
        assert!(!config.scanner.auto_execute);
    }

    #[test]
    fn test_load_config_from_str_invalid_yaml() {
        let result = load_config_from_str("invalid: yaml: content: [");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("YAML parse error"));
    }

    #[test]
    fn test_unknown_venue_kind_rejected() {
        let result = load_config_from_str("venues:\n  - kind: bitmex\n");
        assert!(result.unwrap_err().to_string().contains("YAML parse error"));
    }

    #[test]
    fn test_load_config_from_str_validation_failure() {
        let yaml = r#"
venues:
  - kind: simulated
    name: Paper
  - kind: simulated
    name: paper
"#;
        let result = load_config_from_str(yaml);
        assert!(result.unwrap_err().to_string().contains("more than once"));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/path/config.yaml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Configuration file not found"));
    }

    #[test]
    fn test_load_config_from_file_valid() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(VALID_CONFIG_YAML.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.venues.len(), 3);
        assert_eq!(config.engine.venue_timeout_ms, 3000);
    }

    #[test]
    fn test_load_config_from_file_invalid_yaml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"invalid: [yaml: content").unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(result.unwrap_err().to_string().contains("YAML parse error"));
    }
}
