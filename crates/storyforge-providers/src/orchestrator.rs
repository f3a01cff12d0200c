//! The provider call orchestrator.
//!
//! `generate(prompt, shape)` walks a fixed-priority list of provider
//! attempts, retrying each with exponential backoff per error class, and
//! always terminates in exactly one of: a remote success, or the
//! deterministic local fallback. It never returns an error and never
//! returns empty content.
//!
//! Retry policy per error class:
//! - `Transient` / `Unexpected`: retry this attempt with backoff, then move
//!   to the next attempt.
//! - `Permission`: abandon this attempt immediately (the next attempt may
//!   drop the credential or switch provider).
//! - `QuotaExhausted`: abandon the whole provider.
//! - `MalformedResponse` / unusable JSON: attempt failure, no retry.
//! - `Unavailable`: skip the provider.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, info, warn};

use storyforge_core::config::Config;
use storyforge_core::types::{AttemptOutcome, AttemptRecord};
use storyforge_core::{Content, FallbackReason, Generated, Prompt, ProviderError, Shape, Source};

use crate::extract::extract_json;
use crate::fallback::{fallback_insights, fallback_story};
use crate::huggingface::HuggingFaceProvider;
use crate::openai::OpenAiProvider;
use crate::retry::RetryPolicy;
use crate::traits::Provider;

pub struct Orchestrator {
    providers: Vec<Arc<dyn Provider>>,
    retry: RetryPolicy,
    force_fallback: bool,
    deadline: Duration,
    /// Response length bound from config; caps every prompt's `max_tokens`.
    max_tokens: u32,
}

impl Orchestrator {
    /// Assemble an orchestrator from explicit parts (tests inject scripted
    /// providers here).
    pub fn new(
        providers: Vec<Arc<dyn Provider>>,
        retry: RetryPolicy,
        force_fallback: bool,
        deadline: Duration,
    ) -> Self {
        Orchestrator {
            providers,
            retry,
            force_fallback,
            deadline,
            max_tokens: 1024,
        }
    }

    /// Build the production attempt order from config: OpenAI first when a
    /// real key is configured, Hugging Face always (it has an anonymous
    /// tier).
    pub fn from_config(config: &Config) -> Self {
        let mut providers: Vec<Arc<dyn Provider>> = Vec::new();

        if let Some(openai) = OpenAiProvider::from_config(&config.providers.openai) {
            providers.push(Arc::new(openai));
        }
        providers.push(Arc::new(HuggingFaceProvider::from_config(
            &config.providers.huggingface,
            &config.generation.model,
        )));

        let retry = RetryPolicy {
            max_retries: config.generation.effective_retries(),
            ..RetryPolicy::default()
        };

        Orchestrator {
            providers,
            retry,
            force_fallback: config.generation.force_fallback,
            deadline: Duration::from_secs(config.generation.deadline_secs),
            max_tokens: config.generation.max_tokens,
        }
    }

    /// Generate content for `prompt` in the requested `shape`.
    ///
    /// Infallible by contract: every failure path ends in the deterministic
    /// fallback, tagged with a reason.
    pub async fn generate(&self, prompt: &Prompt, shape: Shape) -> Generated {
        if self.force_fallback {
            info!("forceFallback is enabled, skipping all remote attempts");
            return self.fallback(prompt, shape, FallbackReason::ForcedByConfig, Vec::new());
        }

        if self.providers.is_empty() {
            warn!("no providers configured, answering from fallback");
            return self.fallback(prompt, shape, FallbackReason::NoUsableProvider, Vec::new());
        }

        // Apply the configured response length bound
        let mut prompt = prompt.clone();
        prompt.max_tokens = prompt.max_tokens.min(self.max_tokens);
        let prompt = &prompt;

        let started = Instant::now();
        let mut trace: Vec<AttemptRecord> = Vec::new();
        let mut deadline_hit = false;

        'providers: for provider in &self.providers {
            let attempts = provider.attempts(shape);
            if attempts.is_empty() {
                debug!(provider = provider.name(), "provider has no usable attempts");
                continue;
            }

            'attempts: for attempt in attempts {
                for try_no in 0..self.retry.max_retries {
                    let elapsed_total = started.elapsed();
                    if elapsed_total >= self.deadline {
                        deadline_hit = true;
                        break 'providers;
                    }
                    let remaining = self.deadline - elapsed_total;

                    let t0 = Instant::now();
                    let outcome = timeout(remaining, provider.call(prompt, shape, &attempt)).await;
                    let elapsed = t0.elapsed();

                    let err = match outcome {
                        Err(_) => {
                            trace.push(record(
                                provider.name(),
                                &attempt.model,
                                try_no,
                                AttemptOutcome::Transient,
                                elapsed,
                                None,
                            ));
                            deadline_hit = true;
                            break 'providers;
                        }
                        Ok(Ok(content)) => {
                            match finalize_content(&content, shape) {
                                Some(content) => {
                                    info!(
                                        provider = provider.name(),
                                        model = %attempt.model,
                                        attempt = try_no + 1,
                                        elapsed_ms = elapsed.as_millis() as u64,
                                        "provider attempt succeeded"
                                    );
                                    trace.push(record(
                                        provider.name(),
                                        &attempt.model,
                                        try_no,
                                        AttemptOutcome::Success,
                                        elapsed,
                                        None,
                                    ));
                                    return Generated {
                                        content,
                                        source: Source::Provider {
                                            provider: provider.name().to_string(),
                                            model: attempt.model.clone(),
                                        },
                                        attempts: trace,
                                    };
                                }
                                // Content arrived but the requested JSON
                                // shape could not be recovered from it.
                                None => ProviderError::MalformedResponse(
                                    "unrecoverable JSON in response".to_string(),
                                ),
                            }
                        }
                        Ok(Err(e)) => e,
                    };

                    let class = outcome_of(&err);
                    warn!(
                        provider = provider.name(),
                        model = %attempt.model,
                        attempt = try_no + 1,
                        elapsed_ms = elapsed.as_millis() as u64,
                        outcome = ?class,
                        error = %err,
                        "provider attempt failed"
                    );

                    match &err {
                        ProviderError::Transient { retry_after, .. } => {
                            if try_no + 1 < self.retry.max_retries {
                                let delay = self.retry.backoff(try_no, *retry_after);
                                // A sleep longer than the remaining budget
                                // can only end past the deadline; go
                                // straight to the fallback.
                                let remaining =
                                    self.deadline.saturating_sub(started.elapsed());
                                if delay >= remaining {
                                    trace.push(record(
                                        provider.name(),
                                        &attempt.model,
                                        try_no,
                                        class,
                                        elapsed,
                                        None,
                                    ));
                                    deadline_hit = true;
                                    break 'providers;
                                }
                                trace.push(record(
                                    provider.name(),
                                    &attempt.model,
                                    try_no,
                                    class,
                                    elapsed,
                                    Some(delay),
                                ));
                                debug!(delay_ms = delay.as_millis() as u64, "backing off");
                                sleep(delay).await;
                                continue;
                            }
                            trace.push(record(
                                provider.name(),
                                &attempt.model,
                                try_no,
                                class,
                                elapsed,
                                None,
                            ));
                            continue 'attempts;
                        }
                        ProviderError::Unexpected(_) => {
                            if try_no + 1 < self.retry.max_retries {
                                let delay = self.retry.backoff(try_no, None);
                                let remaining =
                                    self.deadline.saturating_sub(started.elapsed());
                                if delay >= remaining {
                                    trace.push(record(
                                        provider.name(),
                                        &attempt.model,
                                        try_no,
                                        class,
                                        elapsed,
                                        None,
                                    ));
                                    deadline_hit = true;
                                    break 'providers;
                                }
                                trace.push(record(
                                    provider.name(),
                                    &attempt.model,
                                    try_no,
                                    class,
                                    elapsed,
                                    Some(delay),
                                ));
                                sleep(delay).await;
                                continue;
                            }
                            trace.push(record(
                                provider.name(),
                                &attempt.model,
                                try_no,
                                class,
                                elapsed,
                                None,
                            ));
                            continue 'attempts;
                        }
                        ProviderError::Permission(_) | ProviderError::MalformedResponse(_) => {
                            trace.push(record(
                                provider.name(),
                                &attempt.model,
                                try_no,
                                class,
                                elapsed,
                                None,
                            ));
                            continue 'attempts;
                        }
                        ProviderError::QuotaExhausted(_) | ProviderError::Unavailable(_) => {
                            trace.push(record(
                                provider.name(),
                                &attempt.model,
                                try_no,
                                class,
                                elapsed,
                                None,
                            ));
                            continue 'providers;
                        }
                    }
                }
            }
        }

        let reason = if deadline_hit {
            FallbackReason::DeadlineExceeded
        } else {
            FallbackReason::AllAttemptsFailed
        };
        info!(reason = %reason, attempts = trace.len(), "answering from fallback");
        self.fallback(prompt, shape, reason, trace)
    }

    /// Build a shape-complete fallback result from the prompt's seed text.
    fn fallback(
        &self,
        prompt: &Prompt,
        shape: Shape,
        reason: FallbackReason,
        attempts: Vec<AttemptRecord>,
    ) -> Generated {
        let seed = prompt.seed_text();
        let content = match shape {
            Shape::FreeText => Content::Text(fallback_story(seed)),
            Shape::JsonObject => Content::Json(
                serde_json::to_value(fallback_insights(seed))
                    .unwrap_or_else(|_| serde_json::json!({})),
            ),
        };
        Generated {
            content,
            source: Source::Fallback { reason },
            attempts,
        }
    }
}

/// Convert a raw content string into the caller's requested shape.
///
/// Empty content and unrecoverable JSON both count as attempt failure.
fn finalize_content(content: &str, shape: Shape) -> Option<Content> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return None;
    }
    match shape {
        Shape::FreeText => Some(Content::Text(trimmed.to_string())),
        Shape::JsonObject => extract_json(trimmed).map(Content::Json),
    }
}

fn outcome_of(err: &ProviderError) -> AttemptOutcome {
    match err {
        ProviderError::Transient { .. } => AttemptOutcome::Transient,
        ProviderError::Permission(_) => AttemptOutcome::Permission,
        ProviderError::QuotaExhausted(_) => AttemptOutcome::QuotaExhausted,
        ProviderError::MalformedResponse(_) => AttemptOutcome::MalformedResponse,
        ProviderError::Unavailable(_) => AttemptOutcome::Unavailable,
        ProviderError::Unexpected(_) => AttemptOutcome::Unexpected,
    }
}

fn record(
    provider: &str,
    model: &str,
    try_no: u32,
    outcome: AttemptOutcome,
    elapsed: Duration,
    backoff: Option<Duration>,
) -> AttemptRecord {
    AttemptRecord {
        provider: provider.to_string(),
        model: model.to_string(),
        attempt: try_no + 1,
        outcome,
        elapsed,
        backoff,
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
