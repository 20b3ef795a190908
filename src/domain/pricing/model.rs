//! Pricing table domain entity

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::support::errors::{PricingError, PricingResult};

/// Parameter name reported when a table is built without tiers
pub const TIERS_PARAM: &str = "Tiers";

/// A price that applies up to `hour_limit` hours
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTier {
    hour_limit: u32,
    price: Decimal,
}

impl PriceTier {
    pub fn new(hour_limit: u32, price: Decimal) -> Self {
        Self { hour_limit, price }
    }

    pub fn hour_limit(&self) -> u32 {
        self.hour_limit
    }

    pub fn price(&self) -> Decimal {
        self.price
    }
}

impl std::fmt::Display for PriceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "up to {}h @ {}", self.hour_limit, self.price)
    }
}

/// Ordered price tiers plus an optional daily cap
///
/// Tiers are sorted ascending by hour limit once, at construction, and the
/// table never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingTable {
    tiers: Vec<PriceTier>,
    max_daily_price: Option<Decimal>,
}

impl PricingTable {
    /// Build a table from caller-supplied tiers
    ///
    /// # Errors
    /// * [`PricingError::NullTiers`] when `tiers` is `None`
    /// * [`PricingError::EmptyTiers`] when `tiers` holds no elements
    pub fn new(
        tiers: Option<Vec<PriceTier>>,
        max_daily_price: Option<Decimal>,
    ) -> PricingResult<Self> {
        let mut tiers = tiers.ok_or_else(|| {
            warn!("Rejected pricing table: tier collection is absent");
            PricingError::NullTiers
        })?;

        if tiers.is_empty() {
            warn!("Rejected pricing table: no tiers supplied");
            return Err(PricingError::EmptyTiers {
                param: TIERS_PARAM,
                message: "Missing Pricing Tiers".to_string(),
            });
        }

        // stable: equal limits keep their input order
        tiers.sort_by_key(PriceTier::hour_limit);

        debug!(
            tiers = tiers.len(),
            max_daily_price = ?max_daily_price,
            "Pricing table created"
        );

        Ok(Self {
            tiers,
            max_daily_price,
        })
    }

    pub fn tiers(&self) -> &[PriceTier] {
        &self.tiers
    }

    /// The explicit cap, if one was configured
    pub fn max_daily_price(&self) -> Option<Decimal> {
        self.max_daily_price
    }

    /// Daily ceiling: the explicit cap when present, otherwise the highest tier price
    pub fn get_max_daily_price(&self) -> Decimal {
        match self.max_daily_price {
            Some(price) => price,
            None => self
                .tiers
                .iter()
                .map(PriceTier::price)
                .max()
                .unwrap_or(Decimal::ZERO),
        }
    }

    /// Tier charged for the given (1-based) hour of a day
    ///
    /// Hours past the last tier's limit fall to the last tier.
    pub fn tier_for_hour(&self, hour: u32) -> Option<&PriceTier> {
        if hour == 0 {
            return None;
        }
        self.tiers
            .iter()
            .find(|tier| tier.hour_limit >= hour)
            .or_else(|| self.tiers.last())
    }

    /// Sum of the hourly tier prices for the first `hours` hours
    ///
    /// Charges hour `h` at `tier_for_hour(h)`, one band of hours at a time.
    ///
    /// # Errors
    /// * [`PricingError::Overflow`] when the sum exceeds the `Decimal` range
    pub fn tiered_price(&self, hours: u32) -> PricingResult<Decimal> {
        let mut total = Decimal::ZERO;
        let mut charged = 0u32;

        for tier in &self.tiers {
            if charged >= hours {
                break;
            }
            let upto = tier.hour_limit.min(hours);
            if upto > charged {
                total = add_band(total, tier, upto - charged)?;
                charged = upto;
            }
        }

        if charged < hours {
            // non-empty by construction
            if let Some(last) = self.tiers.last() {
                total = add_band(total, last, hours - charged)?;
            }
        }

        Ok(total)
    }
}

fn add_band(total: Decimal, tier: &PriceTier, hours: u32) -> PricingResult<Decimal> {
    tier.price
        .checked_mul(Decimal::from(hours))
        .and_then(|band| total.checked_add(band))
        .ok_or_else(|| {
            PricingError::Overflow(format!("{} hours of {}", hours, tier))
        })
}

impl std::fmt::Display for PricingTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tiers: Vec<String> = self.tiers.iter().map(ToString::to_string).collect();
        write!(
            f,
            "[{}] max/day {}",
            tiers.join(", "),
            self.get_max_daily_price()
        )
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tier(hour_limit: u32, price: Decimal) -> PriceTier {
        PriceTier::new(hour_limit, price)
    }

    fn default_tier() -> PriceTier {
        tier(24, dec!(1))
    }

    #[test]
    fn absent_tiers_are_rejected() {
        let err = PricingTable::new(None, None).unwrap_err();
        assert!(matches!(err, PricingError::NullTiers));
    }

    #[test]
    fn empty_tiers_are_rejected() {
        let err = PricingTable::new(Some(vec![]), None).unwrap_err();
        match &err {
            PricingError::EmptyTiers { param, message } => {
                assert_eq!(*param, "Tiers");
                assert!(message.starts_with("Missing Pricing Tiers"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().starts_with("Missing Pricing Tiers"));
    }

    #[test]
    fn empty_tiers_rejected_even_with_explicit_max() {
        let err = PricingTable::new(Some(vec![]), Some(dec!(10))).unwrap_err();
        assert!(matches!(err, PricingError::EmptyTiers { .. }));
    }

    #[test]
    fn one_tier_in_one_tier_out() {
        let table = PricingTable::new(Some(vec![default_tier()]), None).unwrap();
        assert_eq!(table.tiers().len(), 1);
    }

    #[test]
    fn tiers_are_ordered_by_hour_limit() {
        let table =
            PricingTable::new(Some(vec![tier(24, dec!(1)), tier(4, dec!(1))]), None).unwrap();
        let limits: Vec<u32> = table.tiers().iter().map(PriceTier::hour_limit).collect();
        assert_eq!(limits, vec![4, 24]);
    }

    #[test]
    fn ordering_keeps_all_tiers_and_is_stable() {
        let table = PricingTable::new(
            Some(vec![
                tier(8, dec!(3)),
                tier(2, dec!(5)),
                tier(8, dec!(1)),
                tier(1, dec!(7)),
            ]),
            None,
        )
        .unwrap();

        let tiers: Vec<(u32, Decimal)> = table
            .tiers()
            .iter()
            .map(|t| (t.hour_limit(), t.price()))
            .collect();
        assert_eq!(
            tiers,
            vec![(1, dec!(7)), (2, dec!(5)), (8, dec!(3)), (8, dec!(1))]
        );
    }

    #[test]
    fn max_daily_price_falls_back_to_highest_tier_price() {
        let table =
            PricingTable::new(Some(vec![tier(1, dec!(2)), tier(24, dec!(1))]), None).unwrap();
        assert_eq!(table.get_max_daily_price(), dec!(2));

        let table =
            PricingTable::new(Some(vec![tier(1, dec!(3)), tier(24, dec!(2))]), None).unwrap();
        assert_eq!(table.get_max_daily_price(), dec!(3));
    }

    #[test]
    fn explicit_max_daily_price_wins() {
        let table = PricingTable::new(
            Some(vec![tier(1, dec!(3)), tier(24, dec!(2))]),
            Some(dec!(1.50)),
        )
        .unwrap();
        assert_eq!(table.get_max_daily_price(), dec!(1.50));
        assert_eq!(table.max_daily_price(), Some(dec!(1.50)));

        let table =
            PricingTable::new(Some(vec![default_tier()]), Some(dec!(99.99))).unwrap();
        assert_eq!(table.get_max_daily_price(), dec!(99.99));
    }

    #[test]
    fn max_daily_price_is_stable_across_calls() {
        let table =
            PricingTable::new(Some(vec![tier(1, dec!(2)), tier(24, dec!(1))]), None).unwrap();
        assert_eq!(table.get_max_daily_price(), table.get_max_daily_price());
    }

    #[test]
    fn tier_for_hour_picks_first_covering_tier() {
        let table =
            PricingTable::new(Some(vec![tier(24, dec!(1)), tier(1, dec!(2))]), None).unwrap();
        assert_eq!(table.tier_for_hour(0), None);
        assert_eq!(table.tier_for_hour(1).map(PriceTier::price), Some(dec!(2)));
        assert_eq!(table.tier_for_hour(2).map(PriceTier::price), Some(dec!(1)));
        assert_eq!(table.tier_for_hour(24).map(PriceTier::price), Some(dec!(1)));
        assert_eq!(table.tier_for_hour(25).map(PriceTier::price), Some(dec!(1)));
    }

    #[test]
    fn tiered_price_matches_hour_by_hour_tiers() {
        let table = PricingTable::new(
            Some(vec![tier(2, dec!(4)), tier(4, dec!(3)), tier(6, dec!(2.5))]),
            None,
        )
        .unwrap();

        let mut expected = Decimal::ZERO;
        for hour in 1..=30 {
            expected += table.tier_for_hour(hour).unwrap().price();
            assert_eq!(table.tiered_price(hour).unwrap(), expected, "hour {hour}");
        }
    }

    #[test]
    fn tiered_price_reports_overflow() {
        let table = PricingTable::new(Some(vec![tier(24, Decimal::MAX)]), None).unwrap();
        assert_eq!(table.tiered_price(1).unwrap(), Decimal::MAX);
        let err = table.tiered_price(2).unwrap_err();
        assert!(matches!(err, PricingError::Overflow(_)));

        let table = PricingTable::new(
            Some(vec![tier(1, Decimal::MAX), tier(24, dec!(1))]),
            None,
        )
        .unwrap();
        assert!(matches!(
            table.tiered_price(2),
            Err(PricingError::Overflow(_))
        ));
    }

    #[test]
    fn tiered_price_accumulates_hourly_rates() {
        let table =
            PricingTable::new(Some(vec![tier(1, dec!(2)), tier(24, dec!(1))]), None).unwrap();
        assert_eq!(table.tiered_price(0).unwrap(), dec!(0));
        assert_eq!(table.tiered_price(1).unwrap(), dec!(2));
        assert_eq!(table.tiered_price(3).unwrap(), dec!(4));
        assert_eq!(table.tiered_price(24).unwrap(), dec!(25));

        let table =
            PricingTable::new(Some(vec![tier(1, dec!(3)), tier(24, dec!(2))]), None).unwrap();
        assert_eq!(table.tiered_price(24).unwrap(), dec!(49));
    }

    #[test]
    fn tiered_price_extends_last_tier() {
        let table =
            PricingTable::new(Some(vec![tier(2, dec!(4)), tier(4, dec!(3))]), None).unwrap();
        // 2*4 + 2*3 + 2*3
        assert_eq!(table.tiered_price(6).unwrap(), dec!(20));
    }

    #[test]
    fn display_lists_tiers() {
        let table = PricingTable::new(Some(vec![tier(4, dec!(2.5))]), None).unwrap();
        assert_eq!(table.to_string(), "[up to 4h @ 2.5] max/day 2.5");
    }
}
