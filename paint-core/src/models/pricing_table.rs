//! Unit prices used to turn quantities into money.
//!
//! Material prices are per 18-litre bucket, labor and scaffolding rates are
//! per square meter, and coverage is the area one bucket covers for a
//! single coat. The factory defaults are the standard government reference
//! prices; every entry can be overridden by the user.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{BuildingCondition, Scope};

/// Errors reported by [`PricingTable::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Coverage is the bucket-count divisor and must be positive.
    #[error("coverage per bucket must be positive, got {0}")]
    InvalidCoverage(Decimal),

    /// A price or rate was negative.
    #[error("{field} must not be negative, got {value}")]
    NegativePrice { field: &'static str, value: Decimal },
}

/// Price and rate table for one estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTable {
    // Materials (per bucket)
    pub primer_old: Decimal,
    pub primer_new: Decimal,
    pub topcoat_interior: Decimal,
    pub topcoat_exterior: Decimal,
    pub ceiling_topcoat: Decimal,
    pub ceiling_primer: Decimal,

    // Labor (per m²)
    pub labor_new_interior: Decimal,
    pub labor_new_exterior: Decimal,
    pub labor_old_interior: Decimal,
    pub labor_old_exterior: Decimal,
    pub labor_ceiling: Decimal,

    /// Erecting and dismantling scaffolding, per m² of wall.
    pub scaffolding: Decimal,

    /// m² covered per coat by one bucket.
    pub coverage_per_bucket: Decimal,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self {
            primer_old: Decimal::from(2500),
            primer_new: Decimal::from(1800),
            topcoat_interior: Decimal::from(2500),
            topcoat_exterior: Decimal::from(3500),
            ceiling_topcoat: Decimal::from(1600),
            ceiling_primer: Decimal::from(1800),
            labor_new_interior: Decimal::from(45),
            labor_new_exterior: Decimal::from(60),
            labor_old_interior: Decimal::from(70),
            labor_old_exterior: Decimal::from(95),
            labor_ceiling: Decimal::from(45),
            scaffolding: Decimal::from(120),
            coverage_per_bucket: Decimal::from(150),
        }
    }
}

impl PricingTable {
    /// Wall primer price per bucket for the given building condition.
    pub fn primer_price(
        &self,
        condition: BuildingCondition,
    ) -> Decimal {
        match condition {
            BuildingCondition::Old => self.primer_old,
            BuildingCondition::New => self.primer_new,
        }
    }

    /// Wall topcoat price per bucket. Only exterior scope selects the
    /// exterior product.
    pub fn topcoat_price(
        &self,
        scope: Scope,
    ) -> Decimal {
        match scope {
            Scope::Exterior => self.topcoat_exterior,
            Scope::Interior | Scope::Both => self.topcoat_interior,
        }
    }

    /// Wall labor rate per m² for the condition × scope cross.
    pub fn labor_rate(
        &self,
        condition: BuildingCondition,
        scope: Scope,
    ) -> Decimal {
        match (condition, scope) {
            (BuildingCondition::New, Scope::Exterior) => self.labor_new_exterior,
            (BuildingCondition::Old, Scope::Exterior) => self.labor_old_exterior,
            (BuildingCondition::New, _) => self.labor_new_interior,
            (BuildingCondition::Old, _) => self.labor_old_interior,
        }
    }

    /// Every entry paired with its stable key, in display order.
    pub fn entries(&self) -> [(&'static str, Decimal); 13] {
        [
            ("primer_old", self.primer_old),
            ("primer_new", self.primer_new),
            ("topcoat_interior", self.topcoat_interior),
            ("topcoat_exterior", self.topcoat_exterior),
            ("ceiling_topcoat", self.ceiling_topcoat),
            ("ceiling_primer", self.ceiling_primer),
            ("labor_new_interior", self.labor_new_interior),
            ("labor_new_exterior", self.labor_new_exterior),
            ("labor_old_interior", self.labor_old_interior),
            ("labor_old_exterior", self.labor_old_exterior),
            ("labor_ceiling", self.labor_ceiling),
            ("scaffolding", self.scaffolding),
            ("coverage_per_bucket", self.coverage_per_bucket),
        ]
    }

    /// Mutable access to an entry by key. Returns `None` for unknown keys.
    pub fn entry_mut(
        &mut self,
        key: &str,
    ) -> Option<&mut Decimal> {
        let slot = match key {
            "primer_old" => &mut self.primer_old,
            "primer_new" => &mut self.primer_new,
            "topcoat_interior" => &mut self.topcoat_interior,
            "topcoat_exterior" => &mut self.topcoat_exterior,
            "ceiling_topcoat" => &mut self.ceiling_topcoat,
            "ceiling_primer" => &mut self.ceiling_primer,
            "labor_new_interior" => &mut self.labor_new_interior,
            "labor_new_exterior" => &mut self.labor_new_exterior,
            "labor_old_interior" => &mut self.labor_old_interior,
            "labor_old_exterior" => &mut self.labor_old_exterior,
            "labor_ceiling" => &mut self.labor_ceiling,
            "scaffolding" => &mut self.scaffolding,
            "coverage_per_bucket" => &mut self.coverage_per_bucket,
            _ => return None,
        };
        Some(slot)
    }

    /// Checks that the table can be used for a calculation.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError`] if:
    /// - `coverage_per_bucket` is zero or negative
    /// - any price or rate is negative
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.coverage_per_bucket <= Decimal::ZERO {
            return Err(PricingError::InvalidCoverage(self.coverage_per_bucket));
        }

        for (field, value) in self.entries() {
            if value < Decimal::ZERO {
                return Err(PricingError::NegativePrice { field, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // selection tests
    // =========================================================================

    #[test]
    fn primer_price_follows_condition() {
        let prices = PricingTable::default();

        assert_eq!(prices.primer_price(BuildingCondition::Old), dec!(2500));
        assert_eq!(prices.primer_price(BuildingCondition::New), dec!(1800));
    }

    #[test]
    fn topcoat_price_follows_scope() {
        let prices = PricingTable::default();

        assert_eq!(prices.topcoat_price(Scope::Interior), dec!(2500));
        assert_eq!(prices.topcoat_price(Scope::Exterior), dec!(3500));
    }

    #[test]
    fn labor_rate_covers_all_four_combinations() {
        let prices = PricingTable::default();

        assert_eq!(prices.labor_rate(BuildingCondition::New, Scope::Interior), dec!(45));
        assert_eq!(prices.labor_rate(BuildingCondition::New, Scope::Exterior), dec!(60));
        assert_eq!(prices.labor_rate(BuildingCondition::Old, Scope::Interior), dec!(70));
        assert_eq!(prices.labor_rate(BuildingCondition::Old, Scope::Exterior), dec!(95));
    }

    // =========================================================================
    // entry access tests
    // =========================================================================

    #[test]
    fn entry_mut_reaches_every_listed_key() {
        let mut prices = PricingTable::default();
        let keys: Vec<_> = prices.entries().iter().map(|(key, _)| *key).collect();

        for key in keys {
            let slot = prices
                .entry_mut(key)
                .unwrap_or_else(|| panic!("key '{key}' should be addressable"));
            *slot = dec!(1);
        }

        assert!(prices.entries().iter().all(|(_, value)| *value == dec!(1)));
    }

    #[test]
    fn entry_mut_rejects_unknown_key() {
        let mut prices = PricingTable::default();

        assert!(prices.entry_mut("gold_leaf").is_none());
    }

    // =========================================================================
    // validate tests
    // =========================================================================

    #[test]
    fn default_table_is_valid() {
        assert_eq!(PricingTable::default().validate(), Ok(()));
    }

    #[test]
    fn zero_coverage_is_rejected() {
        let prices = PricingTable {
            coverage_per_bucket: dec!(0),
            ..PricingTable::default()
        };

        assert_eq!(prices.validate(), Err(PricingError::InvalidCoverage(dec!(0))));
    }

    #[test]
    fn negative_coverage_is_rejected() {
        let prices = PricingTable {
            coverage_per_bucket: dec!(-150),
            ..PricingTable::default()
        };

        assert_eq!(
            prices.validate(),
            Err(PricingError::InvalidCoverage(dec!(-150)))
        );
    }

    #[test]
    fn negative_price_names_the_field() {
        let prices = PricingTable {
            scaffolding: dec!(-1),
            ..PricingTable::default()
        };

        assert_eq!(
            prices.validate(),
            Err(PricingError::NegativePrice {
                field: "scaffolding",
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn zero_prices_are_allowed() {
        let prices = PricingTable {
            labor_ceiling: dec!(0),
            ..PricingTable::default()
        };

        assert_eq!(prices.validate(), Ok(()));
    }
}
