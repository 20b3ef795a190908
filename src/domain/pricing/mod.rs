//! Pricing aggregate
//!
//! Contains the PricingTable entity, its price tiers, and fee calculation.

pub mod fee;
pub mod model;

pub use fee::Fee;
pub use model::{PriceTier, PricingTable, TIERS_PARAM};
