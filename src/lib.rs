//! # Pricing Core
//!
//! Time-based pricing tables for parking fee calculation.
//!
//! ## Architecture
//!
//! - **domain**: PricingTable, PriceTier and fee calculation
//! - **config**: TOML configuration holding the pricing table
//! - **support**: error types and tracing setup

pub mod config;
pub mod domain;
pub mod support;

pub use config::{default_config_path, AppConfig, LoggingConfig, PricingConfig};
pub use domain::{Fee, PriceTier, PricingError, PricingTable};
pub use support::errors::{ConfigError, ConfigResult, PricingResult};
pub use support::logging::init_tracing;
