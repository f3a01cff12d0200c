//! Configuration schema — typed settings for generation and providers.
//!
//! Hierarchy: `Config` → `GenerationConfig`, `ProvidersConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.storyforge/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub generation: GenerationConfig,
    pub providers: ProvidersConfig,
}

// ─────────────────────────────────────────────
// Generation
// ─────────────────────────────────────────────

/// Settings that shape every `generate` call.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationConfig {
    /// Preferred Hugging Face model identifier.
    pub model: String,
    /// Maximum tokens per generated response.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
    /// Retries per attempt before moving to the next one. Clamped to 1–5.
    pub max_retries: u32,
    /// Skip all remote calls and answer from the deterministic fallback.
    pub force_fallback: bool,
    /// Overall deadline for one `generate` call, in seconds.
    pub deadline_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "google/flan-t5-base".to_string(),
            max_tokens: 1024,
            temperature: 0.7,
            max_retries: 3,
            force_fallback: false,
            deadline_secs: 60,
        }
    }
}

impl GenerationConfig {
    /// Retry bound with the 1–5 clamp applied.
    pub fn effective_retries(&self) -> u32 {
        self.max_retries.clamp(1, 5)
    }
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Values that mean "no key was actually configured".
const PLACEHOLDER_KEYS: &[&str] = &["", "placeholder", "your_openai_api_key_here", "your_huggingface_api_key_here"];

/// Configuration for a single LLM provider (API key, base URL).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// API key for Bearer authentication.
    #[serde(default)]
    pub api_key: String,
    /// Custom API base URL (overrides the provider default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

impl ProviderConfig {
    /// Whether this provider has a real (non-placeholder) API key.
    ///
    /// Empty strings, the literal `"placeholder"`, anything starting with
    /// `your_`, and keys shorter than 10 characters are treated as absent.
    pub fn has_valid_key(&self) -> bool {
        let key = self.api_key.trim();
        !PLACEHOLDER_KEYS.contains(&key) && !key.starts_with("your_") && key.len() >= 10
    }
}

/// All provider configurations.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub openai: ProviderConfig,
    #[serde(default)]
    pub huggingface: ProviderConfig,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> ProviderConfig {
        ProviderConfig {
            api_key: k.to_string(),
            api_base: None,
        }
    }

    #[test]
    fn test_placeholder_keys_are_absent() {
        assert!(!key("").has_valid_key());
        assert!(!key("placeholder").has_valid_key());
        assert!(!key("your_huggingface_api_key_here").has_valid_key());
        assert!(!key("your_anything").has_valid_key());
        assert!(!key("short").has_valid_key());
    }

    #[test]
    fn test_real_key_is_valid() {
        assert!(key("hf_abcdefghijklmnop").has_valid_key());
        assert!(key("sk-proj-1234567890abcdef").has_valid_key());
    }

    #[test]
    fn test_retry_clamp() {
        let mut gen = GenerationConfig::default();
        gen.max_retries = 0;
        assert_eq!(gen.effective_retries(), 1);
        gen.max_retries = 12;
        assert_eq!(gen.effective_retries(), 5);
        gen.max_retries = 4;
        assert_eq!(gen.effective_retries(), 4);
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.generation.model, "google/flan-t5-base");
        assert!(!cfg.generation.force_fallback);
        assert!(!cfg.providers.openai.has_valid_key());
    }
}
