//! Core building blocks for Storyforge: shared types, the provider error
//! taxonomy, configuration (schema + loader), and the lexicon sentiment
//! scorer.
//!
//! This crate has no HTTP or async machinery — everything network-facing
//! lives in `storyforge-providers`.

pub mod config;
pub mod error;
pub mod sentiment;
pub mod types;
pub mod utils;

pub use error::ProviderError;
pub use types::{Content, FallbackReason, Generated, Prompt, Shape, Source};
