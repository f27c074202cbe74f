//! Paintable wall area from building dimensions and openings.
//!
//! | Quantity        | Formula                                           |
//! |-----------------|---------------------------------------------------|
//! | perimeter       | 2 × (width + length)                              |
//! | gross           | perimeter × height × rooms                        |
//! | ceiling         | width × length × rooms                            |
//! | deduction       | (doors + windows + vents) per room × rooms        |
//! | single-side net | max(0, gross − deduction)                         |
//!
//! For [`Scope::Both`] the gross, deduction and net figures are doubled
//! because both faces of the wall are painted. The single-side net area is
//! never doubled: interior and exterior are priced as two independent
//! systems over the same one-sided area.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::max;
use crate::calculations::estimate::EstimateError;
use crate::models::{Dimensions, Openings, Scope};

/// Area summary shown above the estimate. All values in m².
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaBreakdown {
    /// Wall area before deductions, both faces for [`Scope::Both`].
    pub gross: Decimal,
    /// Opening area deducted, both faces for [`Scope::Both`].
    pub deduction: Decimal,
    /// Paintable wall area, both faces for [`Scope::Both`].
    pub net: Decimal,
    /// Ceiling (floor) area of all rooms.
    pub ceiling: Decimal,
    /// Paintable area of one face; the basis of each priced system.
    pub single_side_net: Decimal,
}

/// Computes the [`AreaBreakdown`] for the given building and scope.
///
/// # Errors
///
/// Returns [`EstimateError::Overflow`] if an area exceeds the range of
/// [`Decimal`].
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use paint_core::calculations::area_breakdown;
/// use paint_core::{Dimensions, Openings, Scope};
///
/// let areas =
///     area_breakdown(&Dimensions::default(), &Openings::default(), Scope::Interior).unwrap();
///
/// assert_eq!(areas.gross, dec!(105));
/// assert_eq!(areas.deduction, dec!(46.8));
/// assert_eq!(areas.single_side_net, dec!(58.2));
/// ```
pub fn area_breakdown(
    dimensions: &Dimensions,
    openings: &Openings,
    scope: Scope,
) -> Result<AreaBreakdown, EstimateError> {
    let rooms = Decimal::from(dimensions.room_count);

    let gross_one_side = dimensions
        .perimeter()
        .and_then(|p| p.checked_mul(dimensions.height))
        .and_then(|a| a.checked_mul(rooms))
        .ok_or_else(|| overflow("wall area"))?;
    let deduction_one_side = openings
        .area_per_room()
        .and_then(|a| a.checked_mul(rooms))
        .ok_or_else(|| overflow("opening area"))?;
    let single_side_net = gross_one_side
        .checked_sub(deduction_one_side)
        .map(|net| max(net, Decimal::ZERO))
        .ok_or_else(|| overflow("wall area"))?;
    let ceiling = dimensions.ceiling_area().ok_or_else(|| overflow("ceiling area"))?;

    let faces = match scope {
        Scope::Both => Decimal::TWO,
        Scope::Interior | Scope::Exterior => Decimal::ONE,
    };
    let both_faces = |value: Decimal| {
        value
            .checked_mul(faces)
            .ok_or_else(|| overflow("wall area"))
    };

    let breakdown = AreaBreakdown {
        gross: both_faces(gross_one_side)?,
        deduction: both_faces(deduction_one_side)?,
        net: both_faces(single_side_net)?,
        ceiling,
        single_side_net,
    };

    debug!(
        gross = %breakdown.gross,
        deduction = %breakdown.deduction,
        net = %breakdown.net,
        ceiling = %breakdown.ceiling,
        "computed area breakdown"
    );

    Ok(breakdown)
}

fn overflow(quantity: &'static str) -> EstimateError {
    EstimateError::Overflow { quantity }
}
