//! Command-line overrides for the estimate form.

use clap::Args;
use paint_core::{BuildingCondition, Scope};
use rust_decimal::Decimal;

use crate::settings::FormSettings;
use crate::utils::{parse_condition, parse_decimal, parse_scope};

/// Form fields settable from the command line. Every flag is optional;
/// unset flags keep the stored value.
#[derive(Debug, Clone, Default, Args)]
pub struct FormArgs {
    // ─── building ────────────────────────────────────────────────────────

    /// Building condition: `new` or `old`.
    #[arg(long, value_parser = parse_condition, help_heading = "Building")]
    pub condition: Option<BuildingCondition>,

    /// Which faces to paint: `interior`, `exterior` or `both`.
    #[arg(long, value_parser = parse_scope, help_heading = "Building")]
    pub scope: Option<Scope>,

    /// Room width in meters.
    #[arg(long, value_parser = parse_decimal, help_heading = "Building")]
    pub width: Option<Decimal>,

    /// Room length in meters.
    #[arg(long, value_parser = parse_decimal, help_heading = "Building")]
    pub length: Option<Decimal>,

    /// Wall height in meters.
    #[arg(long, value_parser = parse_decimal, help_heading = "Building")]
    pub height: Option<Decimal>,

    /// Number of identical rooms.
    #[arg(long, help_heading = "Building")]
    pub rooms: Option<u32>,

    /// Number of floors; exterior work above one floor needs scaffolding.
    #[arg(long, help_heading = "Building")]
    pub floors: Option<u32>,

    // ─── paint system ────────────────────────────────────────────────────

    #[arg(long, value_name = "N", help_heading = "Paint system")]
    pub primer_coats: Option<u32>,

    #[arg(long, value_name = "N", help_heading = "Paint system")]
    pub topcoat_coats: Option<u32>,

    /// Ceiling primer coats; 0 skips the ceiling primer.
    #[arg(long, value_name = "N", help_heading = "Paint system")]
    pub ceiling_primer_coats: Option<u32>,

    #[arg(long, value_name = "N", help_heading = "Paint system")]
    pub ceiling_topcoat_coats: Option<u32>,

    /// Include the ceiling in interior work.
    #[arg(long, conflicts_with = "no_ceiling", help_heading = "Paint system")]
    pub ceiling: bool,

    /// Leave the ceiling out.
    #[arg(long, help_heading = "Paint system")]
    pub no_ceiling: bool,

    // ─── openings (per room) ─────────────────────────────────────────────

    #[arg(long, value_name = "N", help_heading = "Openings (per room)")]
    pub doors: Option<u32>,

    #[arg(long, value_parser = parse_decimal, help_heading = "Openings (per room)")]
    pub door_width: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal, help_heading = "Openings (per room)")]
    pub door_height: Option<Decimal>,

    #[arg(long, value_name = "N", help_heading = "Openings (per room)")]
    pub windows: Option<u32>,

    #[arg(long, value_parser = parse_decimal, help_heading = "Openings (per room)")]
    pub window_width: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal, help_heading = "Openings (per room)")]
    pub window_height: Option<Decimal>,

    /// Deduct ventilation openings.
    #[arg(long, conflicts_with = "no_vents", help_heading = "Openings (per room)")]
    pub vents: bool,

    /// Ignore ventilation openings.
    #[arg(long, help_heading = "Openings (per room)")]
    pub no_vents: bool,

    #[arg(long, value_name = "N", help_heading = "Openings (per room)")]
    pub vent_count: Option<u32>,

    #[arg(long, value_parser = parse_decimal, help_heading = "Openings (per room)")]
    pub vent_width: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal, help_heading = "Openings (per room)")]
    pub vent_height: Option<Decimal>,
}

fn set<T>(
    slot: &mut T,
    value: Option<T>,
) {
    if let Some(value) = value {
        *slot = value;
    }
}

impl FormArgs {
    /// Writes every given flag into `form`.
    pub fn apply(
        &self,
        form: &mut FormSettings,
    ) {
        set(&mut form.condition, self.condition);
        set(&mut form.scope, self.scope);

        let d = &mut form.dimensions;
        set(&mut d.width, self.width);
        set(&mut d.length, self.length);
        set(&mut d.height, self.height);
        set(&mut d.room_count, self.rooms);
        set(&mut d.floors, self.floors);

        let c = &mut form.coats;
        set(&mut c.primer, self.primer_coats);
        set(&mut c.topcoat, self.topcoat_coats);
        set(&mut c.ceiling_primer, self.ceiling_primer_coats);
        set(&mut c.ceiling_topcoat, self.ceiling_topcoat_coats);

        if self.ceiling {
            form.include_ceiling = true;
        }
        if self.no_ceiling {
            form.include_ceiling = false;
        }

        let o = &mut form.openings;
        set(&mut o.door_count, self.doors);
        set(&mut o.door_width, self.door_width);
        set(&mut o.door_height, self.door_height);
        set(&mut o.window_count, self.windows);
        set(&mut o.window_width, self.window_width);
        set(&mut o.window_height, self.window_height);
        if self.vents {
            o.has_vents = true;
        }
        if self.no_vents {
            o.has_vents = false;
        }
        set(&mut o.vent_count, self.vent_count);
        set(&mut o.vent_width, self.vent_width);
        set(&mut o.vent_height, self.vent_height);
    }
}
