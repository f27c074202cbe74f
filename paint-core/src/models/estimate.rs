use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Scope;

/// One paint product line: how many buckets, at what price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialLine {
    pub buckets: u32,
    pub cost: Decimal,
    pub price_per_bucket: Decimal,
    pub name: String,
    pub coats: u32,
}

/// Ceiling work priced alongside an interior wall system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CeilingWork {
    pub area: Decimal,
    pub primer: MaterialLine,
    pub topcoat: MaterialLine,
    pub labor_cost: Decimal,
    pub labor_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborLine {
    pub rate: Decimal,
    pub cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldingLine {
    pub rate: Decimal,
    pub cost: Decimal,
}

/// Priced paint system for one scope (interior or exterior).
///
/// `ceiling` and `scaffolding` are `None` when the work does not apply,
/// which is distinct from a zero-cost line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub net_area: Decimal,
    pub primer: MaterialLine,
    pub topcoat: MaterialLine,
    pub ceiling: Option<CeilingWork>,
    pub labor: LaborLine,
    pub scaffolding: Option<ScaffoldingLine>,
    pub total_material: Decimal,
    pub total_labor: Decimal,
    pub grand_total: Decimal,
}

/// Interior and/or exterior results with their combined total.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FullEstimate {
    pub interior: Option<CalculationResult>,
    pub exterior: Option<CalculationResult>,
    pub grand_total: Decimal,
}

impl FullEstimate {
    /// True when neither scope produced a result.
    pub fn is_empty(&self) -> bool {
        self.interior.is_none() && self.exterior.is_none()
    }

    /// Present results in report order, interior first.
    pub fn sections(&self) -> impl Iterator<Item = (Scope, &CalculationResult)> {
        self.interior
            .iter()
            .map(|r| (Scope::Interior, r))
            .chain(self.exterior.iter().map(|r| (Scope::Exterior, r)))
    }
}
