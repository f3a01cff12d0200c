//! Provider call orchestration for Storyforge.
//!
//! The one genuinely interesting component of the system: given a prompt and
//! a desired output shape, try a fixed-priority list of provider attempts
//! (model ladders, alternate endpoints, anonymous access), retrying each
//! with exponential backoff per error class, and terminate every failure
//! path in a deterministic, shape-complete local fallback.
//!
//! Entry point: [`orchestrator::Orchestrator::generate`].

pub mod extract;
pub mod fallback;
pub mod handle;
pub mod huggingface;
pub mod openai;
pub mod orchestrator;
pub mod retry;
pub mod traits;

pub use orchestrator::Orchestrator;
pub use traits::{AttemptSpec, AuthMode, Provider};
