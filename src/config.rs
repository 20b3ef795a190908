//! Configuration module
//!
//! Reads the application configuration from a TOML file
//! (~/.config/pricing-core/config.toml by default).

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{PriceTier, PricingTable};
use crate::support::errors::{ConfigResult, PricingError};

/// Default location of the configuration file
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pricing-core")
        .join("config.toml")
}

// ── Sections ───────────────────────────────────────────────────

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive (trace, debug, info, warn, error)
    pub level: String,
    /// Output format: "text" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Pricing table as written in the config file
///
/// `tiers` stays optional here so a missing key can be told apart from an
/// empty list when the table is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiers: Option<Vec<PriceTier>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_daily_price: Option<Decimal>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tiers: Some(vec![PriceTier::new(24, Decimal::ONE)]),
            max_daily_price: None,
        }
    }
}

impl TryFrom<PricingConfig> for PricingTable {
    type Error = PricingError;

    fn try_from(cfg: PricingConfig) -> Result<Self, Self::Error> {
        PricingTable::new(cfg.tiers, cfg.max_daily_price)
    }
}

impl TryFrom<&PricingConfig> for PricingTable {
    type Error = PricingError;

    fn try_from(cfg: &PricingConfig) -> Result<Self, Self::Error> {
        PricingTable::new(cfg.tiers.clone(), cfg.max_daily_price)
    }
}

// ── Application config ─────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
}

impl AppConfig {
    /// Load configuration from `path`
    ///
    /// A missing file yields the default configuration.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            info!(
                "Config file {} not found, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Write configuration to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build the validated pricing table
    pub fn pricing_table(&self) -> ConfigResult<PricingTable> {
        Ok(PricingTable::try_from(&self.pricing)?)
    }
}
