//! Consultation with an external text-completion service.
//!
//! [`CompletionService`] is the single seam to the remote model; backends
//! live in their own crates. [`ConsultationRelay`] builds the prompt from the
//! current estimate and turns every failure into a fixed apology message.

pub mod relay;
pub mod service;

pub use relay::{
    ConsultationRelay, EMPTY_RESPONSE_MESSAGE, MODEL_ID, SERVICE_ERROR_MESSAGE, SYSTEM_INSTRUCTION,
    build_context, build_prompt,
};
pub use service::{CompletionError, CompletionService};
