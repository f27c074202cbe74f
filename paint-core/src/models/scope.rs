use serde::{Deserialize, Serialize};

/// Which faces of the walls are painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scope {
    #[default]
    Interior,
    Exterior,
    /// Interior and exterior, priced as two independent systems.
    Both,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interior => "INTERIOR",
            Self::Exterior => "EXTERIOR",
            Self::Both => "BOTH",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "INTERIOR" => Some(Self::Interior),
            "EXTERIOR" => Some(Self::Exterior),
            "BOTH" => Some(Self::Both),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Interior => "เฉพาะภายใน (Interior Only)",
            Self::Exterior => "เฉพาะภายนอก (Exterior Only)",
            Self::Both => "ทั้งอาคาร (Both In & Out)",
        }
    }

    pub fn includes_interior(&self) -> bool {
        matches!(self, Self::Interior | Self::Both)
    }

    pub fn includes_exterior(&self) -> bool {
        matches!(self, Self::Exterior | Self::Both)
    }
}
