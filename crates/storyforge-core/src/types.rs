//! Core types for Storyforge — the contract between the call orchestrator
//! and its collaborators (HTTP router, CLI, persistence).
//!
//! The central invariant: a [`Generated`] result carries exactly one of
//! `Source::Provider` or `Source::Fallback`, and its content is never empty.
//! Callers never observe raw transport errors.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ─────────────────────────────────────────────
// Prompt & Shape
// ─────────────────────────────────────────────

/// A prompt to send to an LLM provider.
///
/// Opaque to the orchestrator: it forwards the text and enforces only the
/// size limit. Providers decide how to map `system` onto their wire format
/// (chat role vs. prepended text).
#[derive(Clone, Debug, PartialEq)]
pub struct Prompt {
    /// Optional system/behavior instructions.
    pub system: Option<String>,
    /// The user-facing prompt text.
    pub text: String,
    /// The raw input the prompt was built from (e.g. the feedback text).
    /// Used for keyword-themed fallback generation; defaults to `text`.
    pub seed: Option<String>,
    /// Maximum tokens the provider may generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

impl Prompt {
    /// Create a prompt with default generation limits.
    pub fn new(text: impl Into<String>) -> Self {
        Prompt {
            system: None,
            text: text.into(),
            seed: None,
            max_tokens: 512,
            temperature: 0.7,
        }
    }

    /// Attach the raw input text the prompt embeds, for fallback theming.
    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// The text the fallback generator should key off.
    pub fn seed_text(&self) -> &str {
        self.seed.as_deref().unwrap_or(&self.text)
    }

    /// Attach system instructions.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Override the generation limit.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Override the sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

/// The response shape the caller wants back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// Unstructured prose (e.g. a user story).
    FreeText,
    /// A parsed JSON object (e.g. thematic insights).
    JsonObject,
}

// ─────────────────────────────────────────────
// Call result
// ─────────────────────────────────────────────

/// Content of a generation result, matching the requested [`Shape`].
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Text(String),
    Json(serde_json::Value),
}

impl Content {
    /// The content as a display string (JSON is serialized compactly).
    pub fn as_text(&self) -> String {
        match self {
            Content::Text(s) => s.clone(),
            Content::Json(v) => v.to_string(),
        }
    }

    /// The parsed JSON value, if this is structured content.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Content::Json(v) => Some(v),
            Content::Text(_) => None,
        }
    }
}

/// Where a result came from: a remote provider, or the deterministic
/// local fallback.
#[derive(Clone, Debug, PartialEq)]
pub enum Source {
    Provider { provider: String, model: String },
    Fallback { reason: FallbackReason },
}

impl Source {
    /// Discriminator string for response bodies (`"openai"`,
    /// `"huggingface"`, or `"fallback"`).
    pub fn tag(&self) -> &str {
        match self {
            Source::Provider { provider, .. } => provider,
            Source::Fallback { .. } => "fallback",
        }
    }

    /// The model identifier, when a provider produced the result.
    pub fn model(&self) -> Option<&str> {
        match self {
            Source::Provider { model, .. } => Some(model),
            Source::Fallback { .. } => None,
        }
    }

    /// The fallback reason, when no provider attempt succeeded.
    pub fn reason(&self) -> Option<String> {
        match self {
            Source::Fallback { reason } => Some(reason.to_string()),
            Source::Provider { .. } => None,
        }
    }
}

/// Why the orchestrator fell back to a locally computed response.
///
/// Presentation (the human-readable string) is kept here, decoupled from any
/// provider's settings page or retry internals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FallbackReason {
    /// The `forceFallback` config flag short-circuited all remote attempts.
    ForcedByConfig,
    /// No provider was configured or constructible.
    NoUsableProvider,
    /// Every attempt across every provider failed.
    AllAttemptsFailed,
    /// The overall deadline expired before any attempt succeeded.
    DeadlineExceeded,
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackReason::ForcedByConfig => {
                write!(f, "forceFallback override is enabled; no remote call was attempted")
            }
            FallbackReason::NoUsableProvider => {
                write!(f, "no provider is configured; set an API key to enable AI generation")
            }
            FallbackReason::AllAttemptsFailed => {
                write!(f, "all provider attempts failed after retries")
            }
            FallbackReason::DeadlineExceeded => {
                write!(f, "generation deadline exceeded before any provider succeeded")
            }
        }
    }
}

/// Discriminated outcome of one `generate` call.
///
/// Exactly one of `{provider success, fallback}` — never both, never neither.
#[derive(Clone, Debug)]
pub struct Generated {
    pub content: Content,
    pub source: Source,
    /// Ordered trace of every attempt made, for diagnostics and tests.
    pub attempts: Vec<AttemptRecord>,
}

impl Generated {
    /// Whether this result came from a remote provider.
    pub fn is_provider(&self) -> bool {
        matches!(self.source, Source::Provider { .. })
    }

    /// Whether this result is the deterministic fallback.
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, Source::Fallback { .. })
    }
}

// ─────────────────────────────────────────────
// Attempt trace
// ─────────────────────────────────────────────

/// Classification of how one attempt ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success,
    Transient,
    Permission,
    QuotaExhausted,
    MalformedResponse,
    Unavailable,
    Unexpected,
}

/// One entry in the attempt trace: which provider/model was tried, how it
/// ended, and how long the orchestrator slept before retrying it.
#[derive(Clone, Debug)]
pub struct AttemptRecord {
    pub provider: String,
    pub model: String,
    /// 1-based retry number within this attempt.
    pub attempt: u32,
    pub outcome: AttemptOutcome,
    pub elapsed: Duration,
    /// Backoff slept after this try, if it was retried.
    pub backoff: Option<Duration>,
}

// ─────────────────────────────────────────────
// Analysis results (story / insights / sentiment)
// ─────────────────────────────────────────────

/// A single extracted theme from feedback insights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    /// Polarity in [-1.0, 1.0].
    pub sentiment: f64,
    /// How often the theme appears (usually 1 for a single feedback item).
    pub count: i64,
}

impl Theme {
    pub fn new(name: impl Into<String>, sentiment: f64, count: i64) -> Self {
        Theme {
            name: name.into(),
            sentiment,
            count,
        }
    }
}

/// Structured insights extracted from one piece of feedback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub themes: Vec<Theme>,
    pub anomalies: Vec<String>,
    pub summary: String,
}

/// A generated user story with provenance metadata.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoryResponse {
    pub story: String,
    /// `"openai"`, `"huggingface"`, or `"fallback"`.
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Generated insights with provenance metadata and timestamp.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InsightsResponse {
    pub themes: Vec<Theme>,
    pub anomalies: Vec<String>,
    pub summary: String,
    /// RFC 3339 UTC timestamp of when the insights were produced.
    pub timestamp: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Sentiment polarity with a three-way label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Polarity in [-1.0, 1.0].
    pub sentiment: f64,
    /// `"positive"`, `"negative"`, or `"neutral"`.
    pub label: String,
}

/// Complete analysis of one feedback item: sentiment + story + insights.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeedbackAnalysis {
    pub text: String,
    pub sentiment: SentimentScore,
    pub story: StoryResponse,
    pub insights: InsightsResponse,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_tag() {
        let provider = Source::Provider {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
        };
        assert_eq!(provider.tag(), "openai");
        assert_eq!(provider.model(), Some("gpt-4o-mini"));
        assert!(provider.reason().is_none());

        let fallback = Source::Fallback {
            reason: FallbackReason::AllAttemptsFailed,
        };
        assert_eq!(fallback.tag(), "fallback");
        assert!(fallback.model().is_none());
        assert!(fallback.reason().unwrap().contains("failed"));
    }

    #[test]
    fn test_fallback_reason_mentions_override() {
        let reason = FallbackReason::ForcedByConfig.to_string();
        assert!(reason.contains("forceFallback"));
    }

    #[test]
    fn test_content_as_text() {
        let text = Content::Text("hello".to_string());
        assert_eq!(text.as_text(), "hello");
        assert!(text.as_json().is_none());

        let json = Content::Json(serde_json::json!({"themes": []}));
        assert_eq!(json.as_text(), r#"{"themes":[]}"#);
        assert!(json.as_json().is_some());
    }

    #[test]
    fn test_prompt_builder() {
        let prompt = Prompt::new("analyze this")
            .with_system("be terse")
            .with_max_tokens(256)
            .with_temperature(0.5);
        assert_eq!(prompt.system.as_deref(), Some("be terse"));
        assert_eq!(prompt.max_tokens, 256);
        assert_eq!(prompt.temperature, 0.5);
        assert_eq!(Prompt::new("x").max_tokens, 512);
    }

    #[test]
    fn test_shape_serde_snake_case() {
        let json = serde_json::to_string(&Shape::JsonObject).unwrap();
        assert_eq!(json, r#""json_object""#);
        let shape: Shape = serde_json::from_str(r#""free_text""#).unwrap();
        assert_eq!(shape, Shape::FreeText);
    }

    #[test]
    fn test_story_response_omits_empty_metadata() {
        let resp = StoryResponse {
            story: "As a user...".to_string(),
            source: "openai".to_string(),
            model: Some("gpt-4o-mini".to_string()),
            reason: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert!(json.get("reason").is_none());
    }
}
