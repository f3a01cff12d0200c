//! Shared CLI helpers — path expansion and formatted output.

use std::path::PathBuf;

use colored::Colorize;

use storyforge_core::types::{InsightsResponse, StoryResponse};

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Color a sentiment label for terminal output.
pub fn colorize_label(label: &str) -> String {
    match label {
        "positive" => label.green().to_string(),
        "negative" => label.red().to_string(),
        _ => label.dimmed().to_string(),
    }
}

/// Print a story response with its source tag.
pub fn print_story(response: &StoryResponse) {
    println!();
    println!("{}", "User Story".cyan().bold());
    println!("{}", response.story);
    print_source(&response.source, response.model.as_deref(), response.reason.as_deref());
}

/// Print an insights response: themes, anomalies, summary, source tag.
pub fn print_insights(response: &InsightsResponse) {
    println!();
    println!("{}", "Insights".cyan().bold());

    if response.themes.is_empty() {
        println!("  {}", "(no themes)".dimmed());
    }
    for theme in &response.themes {
        let sentiment = format!("{:+.2}", theme.sentiment);
        let colored_sentiment = if theme.sentiment > 0.1 {
            sentiment.green().to_string()
        } else if theme.sentiment < -0.1 {
            sentiment.red().to_string()
        } else {
            sentiment.dimmed().to_string()
        };
        println!(
            "  {:<28} {} (x{})",
            theme.name.bold(),
            colored_sentiment,
            theme.count
        );
    }

    if !response.anomalies.is_empty() {
        println!();
        println!("  {}", "Anomalies:".yellow().bold());
        for anomaly in &response.anomalies {
            println!("    - {anomaly}");
        }
    }

    println!();
    println!("  {}", response.summary.dimmed());
    print_source(&response.source, response.model.as_deref(), response.reason.as_deref());
}

fn print_source(source: &str, model: Option<&str>, reason: Option<&str>) {
    let tag = match source {
        "fallback" => source.yellow().to_string(),
        _ => source.green().to_string(),
    };
    let mut line = format!("  source: {tag}");
    if let Some(model) = model {
        line.push_str(&format!(" | model: {model}"));
    }
    if let Some(reason) = reason {
        line.push_str(&format!(" | reason: {reason}"));
    }
    println!("{line}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_plain_path() {
        assert_eq!(expand_tilde("/tmp/config.json"), PathBuf::from("/tmp/config.json"));
    }

    #[test]
    fn test_expand_tilde_home_prefix() {
        if let Some(home) = dirs_next::home_dir() {
            assert_eq!(expand_tilde("~/x.json"), home.join("x.json"));
        }
    }
}
