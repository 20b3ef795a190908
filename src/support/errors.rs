use thiserror::Error;

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("Pricing tiers must be provided")]
    NullTiers,

    #[error("{message} (Parameter '{param}')")]
    EmptyTiers {
        param: &'static str,
        message: String,
    },

    #[error("Negative duration: {0}")]
    NegativeDuration(String),

    #[error("Price overflow: {0}")]
    Overflow(String),
}

impl PricingError {
    /// Name of the offending constructor argument, when there is one
    pub fn param_name(&self) -> Option<&'static str> {
        match self {
            PricingError::EmptyTiers { param, .. } => Some(*param),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid pricing table: {0}")]
    Pricing(#[from] PricingError),
}

pub type PricingResult<T> = Result<T, PricingError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
