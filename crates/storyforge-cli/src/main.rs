//! Storyforge CLI — entry point.
//!
//! # Commands
//!
//! - `storyforge story TEXT` — generate a Jira-style user story
//! - `storyforge insights TEXT` — extract structured insights
//! - `storyforge analyze TEXT` — full analysis (sentiment + story + insights)
//! - `storyforge sentiment TEXT` — lexicon sentiment only
//! - `storyforge init` — write a starter config file
//! - `storyforge status` — show configuration and provider status

mod helpers;
mod init;
mod status;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use storyforge_analysis::{analyze_feedback, generate_insights, generate_story};
use storyforge_core::config::load_config;
use storyforge_core::sentiment::analyze_sentiment;
use storyforge_providers::Orchestrator;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Storyforge — turn customer feedback into stories and insights
#[derive(Parser)]
#[command(name = "storyforge", version, about, long_about = None)]
struct Cli {
    /// Config file path (defaults to ~/.storyforge/config.json)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Print raw JSON instead of formatted output
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Jira-style user story from feedback text
    Story {
        /// The feedback text to analyze
        text: String,
    },

    /// Extract structured insights (themes, anomalies, summary)
    Insights {
        /// The feedback text to analyze
        text: String,
    },

    /// Full analysis: sentiment, story, and insights
    Analyze {
        /// The feedback text to analyze
        text: String,
    },

    /// Score sentiment only (local, no API calls)
    Sentiment {
        /// The text to score
        text: String,
    },

    /// Write a starter config file with defaults
    Init,

    /// Show configuration and provider status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logs);

    let config_path = cli.config.as_deref().map(helpers::expand_tilde);
    let config = load_config(config_path.as_deref());

    match cli.command {
        Commands::Story { text } => {
            let orchestrator = Orchestrator::from_config(&config);
            let response = generate_story(&orchestrator, &text).await;
            if cli.json {
                print_json(&response)?;
            } else {
                helpers::print_story(&response);
            }
        }
        Commands::Insights { text } => {
            let orchestrator = Orchestrator::from_config(&config);
            let response = generate_insights(&orchestrator, &text).await;
            if cli.json {
                print_json(&response)?;
            } else {
                helpers::print_insights(&response);
            }
        }
        Commands::Analyze { text } => {
            let orchestrator = Orchestrator::from_config(&config);
            let analysis = analyze_feedback(&orchestrator, &text).await;
            if cli.json {
                print_json(&analysis)?;
            } else {
                println!();
                println!(
                    "  {:<12} {} ({:+.2})",
                    "Sentiment:".bold(),
                    helpers::colorize_label(&analysis.sentiment.label),
                    analysis.sentiment.sentiment
                );
                helpers::print_story(&analysis.story);
                helpers::print_insights(&analysis.insights);
            }
        }
        Commands::Sentiment { text } => {
            let score = analyze_sentiment(&text);
            if cli.json {
                print_json(&score)?;
            } else {
                println!(
                    "{} ({:+.2})",
                    helpers::colorize_label(&score.label),
                    score.sentiment
                );
            }
        }
        Commands::Init => init::run(config_path.as_deref())?,
        Commands::Status => status::run(&config, config_path.as_deref())?,
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize response")?;
    println!("{json}");
    Ok(())
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("storyforge=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
