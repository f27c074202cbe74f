mod building;
mod building_condition;
mod coat_plan;
mod estimate;
pub mod labels;
mod pricing_table;
mod scope;

pub use building::{Dimensions, Openings};
pub use building_condition::BuildingCondition;
pub use coat_plan::CoatPlan;
pub use estimate::{
    CalculationResult, CeilingWork, FullEstimate, LaborLine, MaterialLine, ScaffoldingLine,
};
pub use pricing_table::{PricingError, PricingTable};
pub use scope::Scope;
