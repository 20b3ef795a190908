pub mod pricing;

pub use pricing::{Fee, PriceTier, PricingTable};

// Re-export error types from support for convenience
pub use crate::support::errors::{PricingError, PricingResult};
