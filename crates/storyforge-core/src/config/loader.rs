//! Config loader — reads `~/.storyforge/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.storyforge/config.json`
//! 3. Environment variables `STORYFORGE_<SECTION>__<FIELD>` (override JSON)
//! 4. Bare `OPENAI_API_KEY` / `HUGGINGFACE_API_KEY` / `HUGGINGFACE_MODEL` /
//!    `FORCE_FALLBACK`, recognized for drop-in compatibility with the usual
//!    provider env conventions
//!
//! The loader never fails: a missing or corrupt file falls back to defaults.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    load_config_from_path(&config_path)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    // Ensure parent directory exists
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `STORYFORGE_<SECTION>__<FIELD>` (double underscore as
/// delimiter).
///
/// Supported overrides:
/// - `STORYFORGE_GENERATION__MODEL` → `generation.model`
/// - `STORYFORGE_GENERATION__MAX_TOKENS` → `generation.max_tokens`
/// - `STORYFORGE_GENERATION__TEMPERATURE` → `generation.temperature`
/// - `STORYFORGE_GENERATION__MAX_RETRIES` → `generation.max_retries`
/// - `STORYFORGE_GENERATION__FORCE_FALLBACK` → `generation.force_fallback`
/// - `STORYFORGE_GENERATION__DEADLINE_SECS` → `generation.deadline_secs`
/// - `STORYFORGE_PROVIDERS__<NAME>__API_KEY` → `providers.<name>.api_key`
/// - `STORYFORGE_PROVIDERS__<NAME>__API_BASE` → `providers.<name>.api_base`
///
/// Bare conventional names are honored too (lowest priority among env vars):
/// `OPENAI_API_KEY`, `HUGGINGFACE_API_KEY`, `HUGGINGFACE_MODEL`,
/// `FORCE_FALLBACK`.
fn apply_env_overrides(mut config: Config) -> Config {
    // Bare conventional names first, so the prefixed forms win.
    if let Ok(val) = std::env::var("OPENAI_API_KEY") {
        config.providers.openai.api_key = val.trim().to_string();
    }
    if let Ok(val) = std::env::var("HUGGINGFACE_API_KEY") {
        config.providers.huggingface.api_key = val.trim().to_string();
    }
    if let Ok(val) = std::env::var("HUGGINGFACE_MODEL") {
        let val = val.trim();
        if !val.is_empty() {
            config.generation.model = val.to_string();
        }
    }
    if let Ok(val) = std::env::var("FORCE_FALLBACK") {
        config.generation.force_fallback = parse_bool(&val);
    }

    // Generation
    if let Ok(val) = std::env::var("STORYFORGE_GENERATION__MODEL") {
        config.generation.model = val;
    }
    if let Ok(val) = std::env::var("STORYFORGE_GENERATION__MAX_TOKENS") {
        if let Ok(n) = val.parse::<u32>() {
            config.generation.max_tokens = n;
        }
    }
    if let Ok(val) = std::env::var("STORYFORGE_GENERATION__TEMPERATURE") {
        if let Ok(t) = val.parse::<f64>() {
            config.generation.temperature = t;
        }
    }
    if let Ok(val) = std::env::var("STORYFORGE_GENERATION__MAX_RETRIES") {
        if let Ok(n) = val.parse::<u32>() {
            config.generation.max_retries = n;
        }
    }
    if let Ok(val) = std::env::var("STORYFORGE_GENERATION__FORCE_FALLBACK") {
        config.generation.force_fallback = parse_bool(&val);
    }
    if let Ok(val) = std::env::var("STORYFORGE_GENERATION__DEADLINE_SECS") {
        if let Ok(n) = val.parse::<u64>() {
            config.generation.deadline_secs = n;
        }
    }

    // Provider keys (by provider name)
    apply_provider_env(&mut config.providers.openai, "OPENAI");
    apply_provider_env(&mut config.providers.huggingface, "HUGGINGFACE");

    config
}

/// Apply env var overrides for a single provider.
fn apply_provider_env(provider: &mut super::schema::ProviderConfig, name: &str) {
    if let Ok(val) = std::env::var(format!("STORYFORGE_PROVIDERS__{name}__API_KEY")) {
        provider.api_key = val;
    }
    if let Ok(val) = std::env::var(format!("STORYFORGE_PROVIDERS__{name}__API_BASE")) {
        provider.api_base = Some(val);
    }
}

/// Accept the usual truthy spellings: `1`, `true`, `yes`, `on`.
fn parse_bool(val: &str) -> bool {
    matches!(
        val.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_missing_file() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.json"));
        // Should return defaults
        assert_eq!(config.generation.max_retries, 3);
        assert_eq!(config.generation.model, "google/flan-t5-base");
    }

    #[test]
    fn test_load_valid_json() {
        let file = write_temp_json(
            r#"{
            "generation": {
                "model": "mistralai/Mistral-7B-Instruct-v0.2",
                "maxRetries": 5
            }
        }"#,
        );

        let config = load_config_from_path(file.path());
        assert_eq!(config.generation.model, "mistralai/Mistral-7B-Instruct-v0.2");
        assert_eq!(config.generation.max_retries, 5);
        // Default preserved
        assert_eq!(config.generation.temperature, 0.7);
    }

    #[test]
    fn test_load_invalid_json_returns_defaults() {
        let file = write_temp_json("not valid json {{{");
        let config = load_config_from_path(file.path());
        assert_eq!(config.generation.max_tokens, 1024);
    }

    #[test]
    fn test_load_empty_json() {
        let file = write_temp_json("{}");
        let config = load_config_from_path(file.path());
        assert_eq!(config.generation.deadline_secs, 60);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.generation.model = "bigscience/bloom-560m".to_string();
        config.providers.huggingface.api_key = "hf_testkey123456".to_string();

        save_config(&config, Some(&path)).unwrap();

        let reloaded = load_config_from_path(&path);
        assert_eq!(reloaded.generation.model, "bigscience/bloom-560m");
        assert_eq!(reloaded.providers.huggingface.api_key, "hf_testkey123456");
    }

    #[test]
    fn test_env_override_force_fallback() {
        std::env::set_var("STORYFORGE_GENERATION__FORCE_FALLBACK", "true");
        let config = apply_env_overrides(Config::default());
        assert!(config.generation.force_fallback);
        std::env::remove_var("STORYFORGE_GENERATION__FORCE_FALLBACK");
    }

    #[test]
    fn test_env_override_provider_key() {
        std::env::set_var("STORYFORGE_PROVIDERS__HUGGINGFACE__API_KEY", "hf_env_key_12345");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.providers.huggingface.api_key, "hf_env_key_12345");
        std::env::remove_var("STORYFORGE_PROVIDERS__HUGGINGFACE__API_KEY");
    }

    #[test]
    fn test_parse_bool_spellings() {
        assert!(parse_bool("1"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool(" yes "));
        assert!(parse_bool("on"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("off"));
        assert!(!parse_bool(""));
    }

    #[test]
    fn test_saved_json_uses_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        save_config(&Config::default(), Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert!(raw["generation"].get("maxTokens").is_some());
        assert!(raw["generation"].get("max_tokens").is_none());
        assert!(raw["generation"].get("forceFallback").is_some());
    }

    #[test]
    fn test_full_config_with_providers() {
        let file = write_temp_json(
            r#"{
            "providers": {
                "openai": { "apiKey": "sk-proj-abc1234567890" },
                "huggingface": { "apiKey": "hf_abc1234567890", "apiBase": "https://custom.hf.co" }
            },
            "generation": {
                "forceFallback": true,
                "deadlineSecs": 15
            }
        }"#,
        );

        let config = load_config_from_path(file.path());
        assert!(config.providers.openai.has_valid_key());
        assert!(config.providers.huggingface.has_valid_key());
        assert_eq!(
            config.providers.huggingface.api_base.as_deref(),
            Some("https://custom.hf.co")
        );
        assert!(config.generation.force_fallback);
        assert_eq!(config.generation.deadline_secs, 15);
    }
}
