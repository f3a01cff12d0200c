//! `storyforge init` — write a starter configuration file.
//!
//! Creates the config with defaults so there is a file to edit; an existing
//! config is left untouched.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use storyforge_core::config::{get_config_path, save_config, Config};

/// Run the init command.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    let default_path = get_config_path();
    let config_path = config_path.unwrap_or(&default_path);

    println!();
    println!("{}", "Storyforge Setup".cyan().bold());
    println!();

    if config_path.exists() {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    } else {
        save_config(&Config::default(), Some(config_path))
            .with_context(|| format!("failed to write config to {}", config_path.display()))?;
        println!(
            "  {} created config at {}",
            "✓".green(),
            config_path.display()
        );
    }

    println!();
    println!("  Add your API keys there (or via OPENAI_API_KEY /");
    println!("  HUGGINGFACE_API_KEY), then check with {}.", "storyforge status".bold());
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        run(Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(raw["generation"]["model"], "google/flan-t5-base");
        assert_eq!(raw["generation"]["forceFallback"], false);
    }

    #[test]
    fn test_init_leaves_existing_config_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"generation": {"model": "custom/model"}}"#).unwrap();

        run(Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("custom/model"));
    }
}
