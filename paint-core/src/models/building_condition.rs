use serde::{Deserialize, Serialize};

/// State of the masonry before painting. Selects the primer product and
/// the labor rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildingCondition {
    /// Newly built; fresh plaster.
    New,
    /// Existing building being repainted.
    #[default]
    Old,
}

impl BuildingCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Old => "OLD",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NEW" => Some(Self::New),
            "OLD" => Some(Self::Old),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "สร้างใหม่ (New Building)",
            Self::Old => "อาคารเก่าทาสีทับ (Repaint)",
        }
    }
}
