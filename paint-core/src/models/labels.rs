//! Display names of the BOQ line items.

pub const PRIMER_OLD: &str = "สีรองพื้นปูนเก่า";
pub const PRIMER_NEW: &str = "สีรองพื้นปูนใหม่";
pub const TOPCOAT_INTERIOR: &str = "สีทับหน้า (ภายใน)";
pub const TOPCOAT_EXTERIOR: &str = "สีทับหน้า (ภายนอก)";
pub const CEILING_TOPCOAT: &str = "สีทับหน้าฝ้าเพดาน";
pub const CEILING_PRIMER: &str = "สีรองพื้นฝ้าเพดาน";
pub const SCAFFOLDING: &str = "ค่าติดตั้งรื้อถอนนั่งร้าน";
pub const WALL_LABOR: &str = "ค่าแรงทาสีผนัง";
pub const CEILING_LABOR: &str = "ค่าแรงทาสีฝ้า";

pub const UNIT_BUCKET: &str = "ถัง";
pub const UNIT_SQM: &str = "ตร.ม.";
