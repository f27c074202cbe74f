//! Full estimate across interior and exterior scopes.
//!
//! [`estimate`] is a pure function of its inputs. Callers recompute it after
//! every change to the form or the pricing table; nothing is cached.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paint_core::calculations::{EstimateInput, estimate};
//! use paint_core::{PricingTable, Scope};
//!
//! let input = EstimateInput {
//!     scope: Scope::Both,
//!     ..EstimateInput::default()
//! };
//!
//! let result = estimate(&input, &PricingTable::default()).unwrap();
//!
//! assert_eq!(result.interior.as_ref().unwrap().grand_total, dec!(9074));
//! assert_eq!(result.grand_total, dec!(9074) + result.exterior.unwrap().grand_total);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::area::area_breakdown;
use crate::calculations::system::{PaintSystemCalculator, SystemInput};
use crate::models::{
    BuildingCondition, CoatPlan, Dimensions, FullEstimate, Openings, PricingError, PricingTable,
    Scope,
};

/// Errors that prevent an estimate from being produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstimateError {
    /// The pricing table failed validation.
    #[error("invalid pricing table: {0}")]
    Pricing(#[from] PricingError),

    /// A length or size in the input was negative.
    #[error("{field} must not be negative, got {value}")]
    InvalidInput { field: &'static str, value: Decimal },

    /// A bucket count exceeded the representable range.
    #[error("bucket count for {area} m² × {coats} coats is too large")]
    BucketOverflow { area: Decimal, coats: u32 },

    /// An area or cost exceeded the representable range.
    #[error("{quantity} is too large to compute")]
    Overflow { quantity: &'static str },
}

/// Everything the user enters on the estimate form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EstimateInput {
    pub condition: BuildingCondition,
    pub scope: Scope,
    pub dimensions: Dimensions,
    pub openings: Openings,
    pub coats: CoatPlan,
    pub include_ceiling: bool,
}

impl EstimateInput {
    /// Rejects negative lengths. Counts are unsigned and always valid.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::InvalidInput`] naming the first negative
    /// field.
    pub fn validate(&self) -> Result<(), EstimateError> {
        let d = &self.dimensions;
        let o = &self.openings;
        let lengths = [
            ("width", d.width),
            ("length", d.length),
            ("height", d.height),
            ("door_width", o.door_width),
            ("door_height", o.door_height),
            ("window_width", o.window_width),
            ("window_height", o.window_height),
            ("vent_width", o.vent_width),
            ("vent_height", o.vent_height),
        ];

        match lengths.into_iter().find(|(_, value)| *value < Decimal::ZERO) {
            Some((field, value)) => Err(EstimateError::InvalidInput { field, value }),
            None => Ok(()),
        }
    }
}

/// Computes the full estimate for the given form input and prices.
///
/// For [`Scope::Both`] the interior and exterior systems are priced
/// independently over the same single-side net area; the ceiling is only
/// ever part of the interior system. An estimate with no paintable area is
/// empty with a zero grand total.
///
/// # Errors
///
/// Returns [`EstimateError`] if the pricing table or input fails validation,
/// or if a bucket count, area or cost overflows.
pub fn estimate(
    input: &EstimateInput,
    prices: &PricingTable,
) -> Result<FullEstimate, EstimateError> {
    prices.validate()?;
    input.validate()?;

    let areas = area_breakdown(&input.dimensions, &input.openings, input.scope)?;
    let calculator = PaintSystemCalculator::new(prices);

    let area = areas.single_side_net;
    let dimensions = &input.dimensions;
    let condition = input.condition;
    let coats = input.coats;
    let system = move |scope: Scope, include_ceiling: bool| SystemInput {
        area,
        condition,
        scope,
        dimensions,
        coats,
        include_ceiling,
    };

    let result = match input.scope {
        Scope::Both => {
            let interior = calculator.calculate(&system(Scope::Interior, input.include_ceiling))?;
            let exterior = calculator.calculate(&system(Scope::Exterior, false))?;
            match (interior, exterior) {
                (Some(interior), Some(exterior)) => FullEstimate {
                    grand_total: interior
                        .grand_total
                        .checked_add(exterior.grand_total)
                        .ok_or(EstimateError::Overflow {
                            quantity: "grand total",
                        })?,
                    interior: Some(interior),
                    exterior: Some(exterior),
                },
                _ => FullEstimate::default(),
            }
        }
        Scope::Interior => {
            let interior = calculator.calculate(&system(Scope::Interior, input.include_ceiling))?;
            FullEstimate {
                grand_total: interior.as_ref().map_or(Decimal::ZERO, |r| r.grand_total),
                interior,
                exterior: None,
            }
        }
        Scope::Exterior => {
            let exterior = calculator.calculate(&system(Scope::Exterior, false))?;
            FullEstimate {
                grand_total: exterior.as_ref().map_or(Decimal::ZERO, |r| r.grand_total),
                interior: None,
                exterior,
            }
        }
    };

    debug!(
        scope = input.scope.as_str(),
        grand_total = %result.grand_total,
        "estimate recomputed"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::labels;

    fn classroom(scope: Scope) -> EstimateInput {
        EstimateInput {
            scope,
            ..EstimateInput::default()
        }
    }

    fn run(input: &EstimateInput) -> FullEstimate {
        estimate(input, &PricingTable::default()).expect("estimate should succeed")
    }

    // =========================================================================
    // end-to-end tests
    // =========================================================================

    #[test]
    fn default_classroom_interior_repaint() {
        let input = EstimateInput {
            condition: BuildingCondition::Old,
            scope: Scope::Interior,
            dimensions: Dimensions {
                width: dec!(6),
                length: dec!(9),
                height: dec!(3.5),
                room_count: 1,
                floors: 1,
            },
            openings: Openings {
                door_count: 2,
                door_width: dec!(0.9),
                door_height: dec!(2.0),
                window_count: 16,
                window_width: dec!(1.2),
                window_height: dec!(1.5),
                has_vents: true,
                vent_count: 24,
                vent_width: dec!(0.6),
                vent_height: dec!(1.0),
            },
            coats: CoatPlan {
                primer: 1,
                topcoat: 2,
                ceiling_primer: 1,
                ceiling_topcoat: 2,
            },
            include_ceiling: false,
        };

        let result = run(&input);
        let interior = result.interior.clone().expect("interior result");

        assert!(result.exterior.is_none());
        assert_eq!(interior.net_area, dec!(58.2));
        assert_eq!(interior.primer.buckets, 1);
        assert_eq!(interior.primer.cost, dec!(2500));
        assert_eq!(interior.primer.name, labels::PRIMER_OLD);
        assert_eq!(interior.topcoat.buckets, 1);
        assert_eq!(interior.topcoat.cost, dec!(2500));
        assert_eq!(interior.labor.cost, dec!(4074));
        assert_eq!(interior.ceiling, None);
        assert_eq!(interior.scaffolding, None);
        assert_eq!(result.grand_total, dec!(9074));
    }

    #[test]
    fn exterior_only_reports_under_exterior_key() {
        let result = run(&classroom(Scope::Exterior));

        assert!(result.interior.is_none());
        let exterior = result.exterior.expect("exterior result");
        // 2500 primer + 3500 topcoat + 58.2 × 95 labor
        assert_eq!(exterior.grand_total, dec!(11529));
        assert_eq!(result.grand_total, dec!(11529));
    }

    // =========================================================================
    // both-scope tests
    // =========================================================================

    #[test]
    fn both_equals_sum_of_independent_runs() {
        let mut input = classroom(Scope::Both);
        input.include_ceiling = true;
        input.dimensions.floors = 3;

        let both = run(&input);
        input.scope = Scope::Interior;
        let interior_only = run(&input);
        input.scope = Scope::Exterior;
        let exterior_only = run(&input);

        assert_eq!(both.interior, interior_only.interior);
        assert_eq!(both.exterior, exterior_only.exterior);
        assert_eq!(
            both.grand_total,
            interior_only.grand_total + exterior_only.grand_total
        );
    }

    #[test]
    fn both_prices_single_side_area_not_doubled() {
        let result = run(&classroom(Scope::Both));

        assert_eq!(result.interior.unwrap().net_area, dec!(58.2));
        assert_eq!(result.exterior.unwrap().net_area, dec!(58.2));
    }

    #[test]
    fn both_applies_ceiling_only_inside_and_scaffolding_only_outside() {
        let mut input = classroom(Scope::Both);
        input.include_ceiling = true;
        input.dimensions.floors = 2;

        let result = run(&input);
        let interior = result.interior.unwrap();
        let exterior = result.exterior.unwrap();

        assert!(interior.ceiling.is_some());
        assert!(interior.scaffolding.is_none());
        assert!(exterior.ceiling.is_none());
        assert!(exterior.scaffolding.is_some());
    }

    // =========================================================================
    // empty-estimate tests
    // =========================================================================

    #[test]
    fn fully_covered_walls_produce_empty_estimate() {
        let mut input = classroom(Scope::Both);
        input.openings.window_count = 1000;

        let result = run(&input);

        assert!(result.is_empty());
        assert_eq!(result.grand_total, Decimal::ZERO);
    }

    #[test]
    fn zero_rooms_produce_empty_estimate() {
        let mut input = classroom(Scope::Interior);
        input.dimensions.room_count = 0;
        input.include_ceiling = true;

        assert_eq!(run(&input), FullEstimate::default());
    }

    // =========================================================================
    // validation tests
    // =========================================================================

    #[test]
    fn zero_coverage_is_rejected_before_dividing() {
        let prices = PricingTable {
            coverage_per_bucket: dec!(0),
            ..PricingTable::default()
        };

        assert_eq!(
            estimate(&classroom(Scope::Interior), &prices),
            Err(EstimateError::Pricing(PricingError::InvalidCoverage(dec!(0))))
        );
    }

    #[test]
    fn negative_length_is_rejected() {
        let mut input = classroom(Scope::Interior);
        input.openings.window_height = dec!(-1.5);

        assert_eq!(
            estimate(&input, &PricingTable::default()),
            Err(EstimateError::InvalidInput {
                field: "window_height",
                value: dec!(-1.5),
            })
        );
    }

    #[test]
    fn tiny_coverage_reports_bucket_overflow() {
        let prices = PricingTable {
            coverage_per_bucket: Decimal::new(1, 28),
            ..PricingTable::default()
        };

        assert_eq!(
            estimate(&classroom(Scope::Interior), &prices),
            Err(EstimateError::BucketOverflow {
                area: dec!(58.2),
                coats: 1,
            })
        );
    }

    #[test]
    fn huge_walls_report_overflow() {
        let mut input = classroom(Scope::Interior);
        input.dimensions.width = dec!(100000000000000000000);
        input.dimensions.height = dec!(10000000000);

        assert_eq!(
            estimate(&input, &PricingTable::default()),
            Err(EstimateError::Overflow {
                quantity: "wall area",
            })
        );
    }

    #[test]
    fn huge_labor_rate_reports_overflow() {
        let prices = PricingTable {
            labor_old_interior: Decimal::MAX,
            ..PricingTable::default()
        };

        assert_eq!(
            estimate(&classroom(Scope::Interior), &prices),
            Err(EstimateError::Overflow {
                quantity: "wall labor cost",
            })
        );
    }

    #[test]
    fn recomputation_reflects_price_changes() {
        let input = classroom(Scope::Interior);
        let before = run(&input);

        let prices = PricingTable {
            labor_old_interior: dec!(100),
            ..PricingTable::default()
        };
        let after = estimate(&input, &prices).unwrap();

        assert_eq!(before.grand_total, dec!(9074));
        assert_eq!(after.grand_total, dec!(10820));
    }
}
