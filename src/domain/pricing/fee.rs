//! Fee calculation for a parking stay

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::model::PricingTable;
use crate::support::errors::{PricingError, PricingResult};

const HOURS_PER_DAY: u32 = 24;
const SECONDS_PER_HOUR: i64 = 3600;

/// Amount charged for a stay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fee {
    /// Complete 24h days, each charged at the daily maximum
    pub days: i64,
    /// Hours left over after the complete days
    pub remaining_hours: u32,
    pub days_cost: Decimal,
    pub remaining_cost: Decimal,
    pub total: Decimal,
}

impl PricingTable {
    /// Tiered price for part of a day, capped at the daily maximum
    pub fn daily_price(&self, hours: u32) -> PricingResult<Decimal> {
        let price = self.tiered_price(hours.min(HOURS_PER_DAY))?;
        Ok(price.min(self.get_max_daily_price()))
    }

    /// Price a stay of the given length
    ///
    /// The stay is rounded up to whole hours. Every complete day costs the
    /// daily maximum; the remainder is priced through the tiers.
    pub fn calculate_fee(&self, stay: Duration) -> PricingResult<Fee> {
        let seconds = stay.num_seconds();
        if seconds < 0 {
            return Err(PricingError::NegativeDuration(format!(
                "stay of {seconds}s"
            )));
        }

        let hours = (seconds + SECONDS_PER_HOUR - 1) / SECONDS_PER_HOUR;
        let days = hours / i64::from(HOURS_PER_DAY);
        // always < 24
        let remaining_hours = (hours % i64::from(HOURS_PER_DAY)) as u32;

        let daily_max = self.get_max_daily_price();
        let days_cost = daily_max.checked_mul(Decimal::from(days)).ok_or_else(|| {
            PricingError::Overflow(format!("{days} days at {daily_max}"))
        })?;
        let remaining_cost = self.daily_price(remaining_hours)?;
        let total = days_cost.checked_add(remaining_cost).ok_or_else(|| {
            PricingError::Overflow(format!("{days_cost} + {remaining_cost}"))
        })?;

        debug!(
            seconds,
            days,
            remaining_hours,
            total = %total,
            "Fee calculated"
        );

        Ok(Fee {
            days,
            remaining_hours,
            days_cost,
            remaining_cost,
            total,
        })
    }

    /// Price the stay between an entry and an exit timestamp
    pub fn calculate_fee_between(
        &self,
        entry: DateTime<Utc>,
        exit: DateTime<Utc>,
    ) -> PricingResult<Fee> {
        if exit < entry {
            return Err(PricingError::NegativeDuration(format!(
                "exit {exit} is before entry {entry}"
            )));
        }
        self.calculate_fee(exit - entry)
    }
}

// ── Tests ──────────────────────────────────────────────────────
