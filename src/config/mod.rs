//! Configuration module for engine settings and YAML loading
//!
//! This module provides:
//! - Configuration types (`AppConfig`, `EngineConfig`, `VenueConfig`, `ScannerConfig`)
//! - YAML loading functionality (`load_config`)
//! - Defaults with environment variable overrides
//! - Logging initialization

pub mod constants;
mod loader;
pub mod logging;
mod types;

// Re-export types
pub use types::{AppConfig, EngineConfig, ScannerConfig, VenueConfig, VenueKind};

// Re-export loader functions
pub use loader::{load_config, load_config_from_str};

pub use logging::init_logging;
