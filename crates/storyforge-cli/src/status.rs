//! `storyforge status` — show configuration and provider status.
//!
//! Covers what the operator usually needs to debug "why is everything
//! coming from the fallback": config path, key validity per provider,
//! the preferred model, and the force-fallback switch.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use storyforge_core::config::{get_config_path, Config, ProviderConfig};

/// Run the status command.
pub fn run(config: &Config, config_path: Option<&Path>) -> Result<()> {
    let default_path = get_config_path();
    let config_path = config_path.unwrap_or(&default_path);

    println!();
    println!("{}", "Storyforge Status".cyan().bold());
    println!();

    // Config file
    let config_exists = config_path.exists();
    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_exists {
            "✓".green().to_string()
        } else {
            "(not found, using defaults)".dimmed().to_string()
        }
    );

    // Generation settings
    println!(
        "  {:<18} {}",
        "Model:".bold(),
        config.generation.model
    );
    println!(
        "  {:<18} {} | max_tokens: {} | retries: {}",
        "Parameters:".bold(),
        format!("temp: {}", config.generation.temperature).dimmed(),
        format!("{}", config.generation.max_tokens).dimmed(),
        format!("{}", config.generation.effective_retries()).dimmed(),
    );

    // Force fallback
    if config.generation.force_fallback {
        println!(
            "  {:<18} {}",
            "Force fallback:".bold(),
            "enabled — no API calls will be made".yellow()
        );
    } else {
        println!(
            "  {:<18} {}",
            "Force fallback:".bold(),
            "disabled".dimmed()
        );
    }

    // Providers
    println!();
    println!("  {}", "Providers:".bold());
    print_provider("OpenAI", &config.providers.openai);
    print_provider("Hugging Face", &config.providers.huggingface);

    // Hugging Face works without a key, at reduced rate limits
    if !config.providers.huggingface.has_valid_key() {
        println!();
        println!(
            "  {}",
            "Hugging Face will be tried anonymously (rate-limited).".dimmed()
        );
    }

    println!();
    Ok(())
}

fn print_provider(display_name: &str, provider: &ProviderConfig) {
    let status = if provider.has_valid_key() {
        format!(
            "{} (key set, {})",
            "✓".green(),
            preview_key(&provider.api_key)
        )
    } else if provider.api_key.trim().is_empty() {
        format!("{}", "· no key".dimmed())
    } else {
        format!("{}", "⚠ key looks like a placeholder".yellow())
    };
    println!("    {:<20} {}", display_name, status);
}

/// Show enough of a key to recognize it without printing it whole.
fn preview_key(key: &str) -> String {
    let key = key.trim();
    let head: String = key.chars().take(10).collect();
    if key.chars().count() > 14 {
        let tail: String = key.chars().skip(key.chars().count() - 4).collect();
        format!("{head}...{tail}")
    } else {
        format!("{head}...")
    }
}
