//! Provider error taxonomy.
//!
//! Every remote failure is classified into one of these variants, and the
//! classification drives the orchestrator's retry policy:
//!
//! | Variant             | Policy                                         |
//! |---------------------|------------------------------------------------|
//! | `Transient`         | retry with exponential backoff, then next attempt |
//! | `Permission`        | no retry; next attempt (e.g. drop credential)  |
//! | `QuotaExhausted`    | abandon the whole provider                     |
//! | `MalformedResponse` | attempt failure, no retry                      |
//! | `Unavailable`       | provider unusable; skip it                     |
//! | `Unexpected`        | retry with backoff, then next attempt          |
//!
//! None of these ever escape `Orchestrator::generate` — every path ends in
//! either the next attempt or the deterministic fallback.

use std::time::Duration;
use thiserror::Error;

/// A classified failure from one provider attempt.
#[derive(Clone, Debug, Error)]
pub enum ProviderError {
    /// Rate limit, model cold-start, timeout, or connection failure.
    /// Retryable with backoff.
    #[error("transient provider error: {message}")]
    Transient {
        message: String,
        /// Server-suggested wait, if any (e.g. from `Retry-After`).
        retry_after: Option<Duration>,
    },

    /// Authentication or permission failure (HTTP 401/403). Retrying the
    /// same attempt cannot succeed.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Quota or billing exhausted. Fatal for the whole provider, not just
    /// the current model.
    #[error("quota exhausted: {0}")]
    QuotaExhausted(String),

    /// The provider answered, but the body could not be reduced to usable
    /// content (empty string, unparseable JSON, unknown shape).
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The provider cannot be used at all (no credential where one is
    /// required, no endpoint).
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Anything unclassified. Retried like a transient error.
    #[error("unexpected provider error: {0}")]
    Unexpected(String),
}

impl ProviderError {
    /// Convenience constructor for transient errors without a server hint.
    pub fn transient(message: impl Into<String>) -> Self {
        ProviderError::Transient {
            message: message.into(),
            retry_after: None,
        }
    }

    /// Whether the orchestrator should retry this same attempt with backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderError::Transient { .. } | ProviderError::Unexpected(_)
        )
    }

    /// Whether this failure poisons the entire provider.
    pub fn is_provider_fatal(&self) -> bool {
        matches!(self, ProviderError::QuotaExhausted(_))
    }
}
