//! Pricing of one paint system (interior or exterior) over a given wall area.
//!
//! # Line items
//!
//! | Line             | Quantity                       | Price source                    |
//! |------------------|--------------------------------|---------------------------------|
//! | Wall primer      | ceil(area × coats / coverage)  | old or new primer by condition  |
//! | Wall topcoat     | ceil(area × coats / coverage)  | interior or exterior topcoat    |
//! | Ceiling primer   | ceil(ceiling × coats / coverage), skipped at 0 coats | ceiling primer |
//! | Ceiling topcoat  | ceil(ceiling × coats / coverage) | ceiling topcoat               |
//! | Wall labor       | area                           | condition × scope rate          |
//! | Ceiling labor    | ceiling area                   | ceiling rate (not per coat)     |
//! | Scaffolding      | area                           | scaffolding rate                |
//!
//! Ceiling work applies only to interior scope with the ceiling flag set.
//! Scaffolding applies only to exterior scope on buildings with more than
//! one floor. Both are absent (not zero) otherwise.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::bucket_count;
use crate::calculations::estimate::EstimateError;
use crate::models::{
    BuildingCondition, CalculationResult, CeilingWork, CoatPlan, Dimensions, LaborLine,
    MaterialLine, PricingTable, ScaffoldingLine, Scope, labels,
};

/// Inputs for one paint system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInput<'a> {
    /// One-sided net wall area in m².
    pub area: Decimal,
    pub condition: BuildingCondition,
    /// Must be interior or exterior; [`Scope::Both`] yields no result.
    pub scope: Scope,
    pub dimensions: &'a Dimensions,
    pub coats: CoatPlan,
    pub include_ceiling: bool,
}

/// Calculator for a single paint system.
///
/// Holds the pricing table; [`PaintSystemCalculator::calculate`] is pure and
/// may be called any number of times.
#[derive(Debug, Clone)]
pub struct PaintSystemCalculator<'a> {
    prices: &'a PricingTable,
}

impl<'a> PaintSystemCalculator<'a> {
    /// Creates a calculator over a validated pricing table.
    pub fn new(prices: &'a PricingTable) -> Self {
        Self { prices }
    }

    /// Prices one paint system.
    ///
    /// Returns `Ok(None)` when there is nothing to estimate: the area is zero
    /// or negative, or the scope is [`Scope::Both`].
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::BucketOverflow`] if a bucket count does not
    /// fit in a `u32`, or [`EstimateError::Overflow`] if a cost or area
    /// exceeds the range of [`Decimal`].
    pub fn calculate(
        &self,
        input: &SystemInput<'_>,
    ) -> Result<Option<CalculationResult>, EstimateError> {
        if input.area <= Decimal::ZERO || input.scope == Scope::Both {
            return Ok(None);
        }

        let primer = self.material_line(
            input.area,
            input.coats.primer,
            self.prices.primer_price(input.condition),
            primer_name(input.condition),
        )?;
        let topcoat = self.material_line(
            input.area,
            input.coats.topcoat,
            self.prices.topcoat_price(input.scope),
            topcoat_name(input.scope),
        )?;

        let labor_rate = self.prices.labor_rate(input.condition, input.scope);
        let labor = LaborLine {
            rate: labor_rate,
            cost: cost(input.area, labor_rate, "wall labor cost")?,
        };

        let scaffolding = self.scaffolding(input)?;
        let ceiling = if input.scope == Scope::Interior && input.include_ceiling {
            Some(self.ceiling_work(input.dimensions, input.coats)?)
        } else {
            None
        };

        let ceiling_material = match &ceiling {
            Some(c) => sum(&[c.primer.cost, c.topcoat.cost], "material total")?,
            None => Decimal::ZERO,
        };
        let ceiling_labor = ceiling.as_ref().map_or(Decimal::ZERO, |c| c.labor_cost);
        let scaffolding_cost = scaffolding.as_ref().map_or(Decimal::ZERO, |s| s.cost);

        let total_material = sum(
            &[primer.cost, topcoat.cost, ceiling_material],
            "material total",
        )?;
        let total_labor = sum(&[labor.cost, scaffolding_cost, ceiling_labor], "labor total")?;
        let grand_total = sum(&[total_material, total_labor], "grand total")?;

        debug!(
            scope = input.scope.as_str(),
            area = %input.area,
            %total_material,
            %total_labor,
            %grand_total,
            "priced paint system"
        );

        Ok(Some(CalculationResult {
            net_area: input.area,
            primer,
            topcoat,
            ceiling,
            labor,
            scaffolding,
            total_material,
            total_labor,
            grand_total,
        }))
    }

    /// Buckets and cost for one material layer.
    fn material_line(
        &self,
        area: Decimal,
        coats: u32,
        price_per_bucket: Decimal,
        name: &str,
    ) -> Result<MaterialLine, EstimateError> {
        let buckets = bucket_count(area, coats, self.prices.coverage_per_bucket)
            .ok_or(EstimateError::BucketOverflow { area, coats })?;

        Ok(MaterialLine {
            buckets,
            cost: cost(Decimal::from(buckets), price_per_bucket, "material cost")?,
            price_per_bucket,
            name: name.to_string(),
            coats,
        })
    }

    /// Scaffolding is needed only outside and above the ground floor.
    fn scaffolding(
        &self,
        input: &SystemInput<'_>,
    ) -> Result<Option<ScaffoldingLine>, EstimateError> {
        if input.scope != Scope::Exterior || input.dimensions.floors <= 1 {
            return Ok(None);
        }

        Ok(Some(ScaffoldingLine {
            rate: self.prices.scaffolding,
            cost: cost(input.area, self.prices.scaffolding, "scaffolding cost")?,
        }))
    }

    /// Ceiling primer, topcoat and labor over the full floor area.
    fn ceiling_work(
        &self,
        dimensions: &Dimensions,
        coats: CoatPlan,
    ) -> Result<CeilingWork, EstimateError> {
        let area = dimensions
            .ceiling_area()
            .ok_or(EstimateError::Overflow {
                quantity: "ceiling area",
            })?;

        let primer = self.material_line(
            area,
            coats.ceiling_primer,
            self.prices.ceiling_primer,
            labels::CEILING_PRIMER,
        )?;
        let topcoat = self.material_line(
            area,
            coats.ceiling_topcoat,
            self.prices.ceiling_topcoat,
            labels::CEILING_TOPCOAT,
        )?;

        Ok(CeilingWork {
            area,
            primer,
            topcoat,
            labor_cost: cost(area, self.prices.labor_ceiling, "ceiling labor cost")?,
            labor_rate: self.prices.labor_ceiling,
        })
    }
}

/// `quantity × rate`, or [`EstimateError::Overflow`] naming `what`.
fn cost(
    quantity: Decimal,
    rate: Decimal,
    what: &'static str,
) -> Result<Decimal, EstimateError> {
    quantity
        .checked_mul(rate)
        .ok_or(EstimateError::Overflow { quantity: what })
}

fn sum(
    values: &[Decimal],
    what: &'static str,
) -> Result<Decimal, EstimateError> {
    values
        .iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(*value))
        .ok_or(EstimateError::Overflow { quantity: what })
}

fn primer_name(condition: BuildingCondition) -> &'static str {
    match condition {
        BuildingCondition::Old => labels::PRIMER_OLD,
        BuildingCondition::New => labels::PRIMER_NEW,
    }
}

fn topcoat_name(scope: Scope) -> &'static str {
    match scope {
        Scope::Exterior => labels::TOPCOAT_EXTERIOR,
        Scope::Interior | Scope::Both => labels::TOPCOAT_INTERIOR,
    }
}
