//! Storyforge Analysis — feedback analysis services on top of the
//! provider orchestrator.
//!
//! This crate contains:
//! - **prompts**: Prompt builders for story and insights generation
//! - **story**: Jira-style user story generation
//! - **insights**: Structured theme/anomaly/summary extraction
//! - **analyze**: Lexicon sentiment plus the combined analysis pipeline

pub mod analyze;
pub mod insights;
pub mod prompts;
pub mod story;

#[cfg(test)]
pub(crate) mod testutil;

pub use analyze::analyze_feedback;
pub use insights::generate_insights;
pub use story::generate_story;
