//! Area, material and labor calculations for a paint estimate.
//!
//! The pipeline is [`area_breakdown`] → [`PaintSystemCalculator`] per scope →
//! [`estimate`], which combines the scopes into a [`crate::FullEstimate`].

pub mod area;
pub mod common;
pub mod estimate;
pub mod system;

pub use area::{AreaBreakdown, area_breakdown};
pub use estimate::{EstimateError, EstimateInput, estimate};
pub use system::{PaintSystemCalculator, SystemInput};
