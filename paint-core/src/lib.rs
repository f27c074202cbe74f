pub mod calculations;
pub mod consult;
pub mod models;

pub use consult::{CompletionError, CompletionService, ConsultationRelay};
pub use models::*;
