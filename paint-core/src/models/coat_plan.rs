use serde::{Deserialize, Serialize};

/// Number of coats applied for each layer of the paint system.
/// Zero coats skips the layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoatPlan {
    pub primer: u32,
    pub topcoat: u32,
    pub ceiling_primer: u32,
    pub ceiling_topcoat: u32,
}

impl Default for CoatPlan {
    fn default() -> Self {
        Self {
            primer: 1,
            topcoat: 2,
            ceiling_primer: 1,
            ceiling_topcoat: 2,
        }
    }
}
