//! The `Provider` trait — the polymorphic seam between the orchestrator and
//! each LLM backend.
//!
//! Each backend publishes an ordered list of [`AttemptSpec`]s (its model
//! ladder, alternate endpoints, anonymous access) and executes one attempt
//! at a time. The orchestrator owns retries, backoff, and fallback; a
//! provider only classifies its own failures into [`ProviderError`]s.

use async_trait::async_trait;

use storyforge_core::{Prompt, ProviderError, Shape};

/// How an attempt authenticates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    /// Send the configured API key as a Bearer token.
    Bearer,
    /// No credential — public/anonymous access.
    Anonymous,
}

/// One backend option: a model, a credential mode, and an endpoint.
///
/// Attempts are tried in the order the provider returns them; the
/// orchestrator never reorders them.
#[derive(Clone, Debug)]
pub struct AttemptSpec {
    /// Model identifier (e.g. `"gpt-4o-mini"`, `"google/flan-t5-base"`).
    pub model: String,
    pub auth: AuthMode,
    /// API base URL for this attempt.
    pub endpoint: String,
}

/// Trait that all LLM backends implement.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short provider name used in `source` tags and logs
    /// (e.g. `"openai"`, `"huggingface"`).
    fn name(&self) -> &'static str;

    /// The ordered attempt list for this provider, given the caller's
    /// desired shape. Empty means the provider is unusable as configured.
    fn attempts(&self, shape: Shape) -> Vec<AttemptSpec>;

    /// Execute a single attempt and reduce the response to one normalized,
    /// non-empty content string.
    ///
    /// All failures are classified; raw transport errors never escape.
    async fn call(
        &self,
        prompt: &Prompt,
        shape: Shape,
        attempt: &AttemptSpec,
    ) -> Result<String, ProviderError>;
}
