use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Footprint and height of one typical room, plus how many such rooms and
/// floors the building has. Lengths are in meters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: Decimal,
    pub length: Decimal,
    pub height: Decimal,
    pub room_count: u32,
    pub floors: u32,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: Decimal::new(6, 0),
            length: Decimal::new(9, 0),
            height: Decimal::new(35, 1),
            room_count: 1,
            floors: 1,
        }
    }
}

impl Dimensions {
    /// Wall perimeter of one room. `None` if it exceeds the range of
    /// [`Decimal`], as do the other area helpers.
    pub fn perimeter(&self) -> Option<Decimal> {
        self.width.checked_add(self.length)?.checked_mul(Decimal::TWO)
    }

    /// Floor area of all rooms, which is also the ceiling area.
    pub fn ceiling_area(&self) -> Option<Decimal> {
        self.width
            .checked_mul(self.length)?
            .checked_mul(Decimal::from(self.room_count))
    }
}

/// Per-room openings that are deducted from the paintable wall area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Openings {
    pub door_count: u32,
    pub door_width: Decimal,
    pub door_height: Decimal,
    pub window_count: u32,
    pub window_width: Decimal,
    pub window_height: Decimal,
    /// Ventilation blocks; counted only when set.
    pub has_vents: bool,
    pub vent_count: u32,
    pub vent_width: Decimal,
    pub vent_height: Decimal,
}

impl Default for Openings {
    fn default() -> Self {
        Self {
            door_count: 2,
            door_width: Decimal::new(90, 2),
            door_height: Decimal::new(200, 2),
            window_count: 16,
            window_width: Decimal::new(120, 2),
            window_height: Decimal::new(150, 2),
            has_vents: true,
            vent_count: 24,
            vent_width: Decimal::new(60, 2),
            vent_height: Decimal::new(100, 2),
        }
    }
}

impl Openings {
    pub fn door_area(&self) -> Option<Decimal> {
        opening_area(self.door_count, self.door_width, self.door_height)
    }

    pub fn window_area(&self) -> Option<Decimal> {
        opening_area(self.window_count, self.window_width, self.window_height)
    }

    pub fn vent_area(&self) -> Option<Decimal> {
        if self.has_vents {
            opening_area(self.vent_count, self.vent_width, self.vent_height)
        } else {
            Some(Decimal::ZERO)
        }
    }

    /// Total opening area of a single room.
    pub fn area_per_room(&self) -> Option<Decimal> {
        self.door_area()?
            .checked_add(self.window_area()?)?
            .checked_add(self.vent_area()?)
    }

    /// Openings with every count set to zero.
    pub fn none() -> Self {
        Self {
            door_count: 0,
            window_count: 0,
            has_vents: false,
            vent_count: 0,
            ..Self::default()
        }
    }
}

fn opening_area(
    count: u32,
    width: Decimal,
    height: Decimal,
) -> Option<Decimal> {
    Decimal::from(count).checked_mul(width)?.checked_mul(height)
}
