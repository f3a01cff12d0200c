//! Deterministic local fallback generation.
//!
//! When every remote attempt fails (or the force-fallback override is set),
//! the orchestrator answers from here: a structurally complete response in
//! the caller's expected shape, themed by simple keyword matching against
//! the input text. Never a bare apology string.

use storyforge_core::types::{Insights, Theme};
use storyforge_core::utils::truncate_string;

/// Keyword groups and the story template each one selects.
/// First match wins; order reflects severity.
const STORY_THEMES: &[(&[&str], &str, &str)] = &[
    (
        &["crash", "error", "bug"],
        "fix stability issues",
        "ensure reliable app performance",
    ),
    (
        &["slow", "performance", "lag"],
        "optimize performance",
        "provide faster response times",
    ),
    (
        &["feature", "add", "need"],
        "add requested features",
        "meet user needs and expectations",
    ),
    (
        &["ui", "interface", "design", "layout"],
        "improve the user interface",
        "create a more intuitive user experience",
    ),
];

/// Build a templated user story from the feedback text.
///
/// Always a full story with acceptance criteria and context, so the caller
/// cannot distinguish the fallback's *shape* from a provider response.
pub fn fallback_story(feedback: &str) -> String {
    let lower = feedback.to_lowercase();

    let (goal, benefit) = STORY_THEMES
        .iter()
        .find(|(keywords, _, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, goal, benefit)| (*goal, *benefit))
        .unwrap_or(("improve the product", "enhance the user experience"));

    format!(
        "**User Story:**\n\
         As a customer, I want {goal} so that {benefit}.\n\
         \n\
         **Acceptance Criteria:**\n\
         1. The system addresses the core issue mentioned in the feedback\n\
         2. Changes are tested and verified before deployment\n\
         3. User experience is improved based on the feedback provided\n\
         \n\
         **Context:**\n\
         This story addresses the customer feedback: \"{}\"\n",
        truncate_string(feedback, 103)
    )
}

/// Build a default-but-themed insights structure from the feedback text.
pub fn fallback_insights(feedback: &str) -> Insights {
    let lower = feedback.to_lowercase();
    let mut themes = Vec::new();
    let mut anomalies = Vec::new();

    if ["crash", "error", "bug"].iter().any(|k| lower.contains(k)) {
        themes.push(Theme::new("Stability & Reliability", -0.8, 1));
        anomalies.push("Critical stability issues reported".to_string());
    }
    if ["slow", "performance", "lag"].iter().any(|k| lower.contains(k)) {
        themes.push(Theme::new("Performance", -0.6, 1));
    }
    if ["ui", "interface", "design", "layout"]
        .iter()
        .any(|k| lower.contains(k))
    {
        themes.push(Theme::new("User Interface", -0.4, 1));
    }
    if ["feature", "add", "missing"].iter().any(|k| lower.contains(k)) {
        themes.push(Theme::new("Feature Requests", 0.0, 1));
    }
    if ["great", "love", "excellent", "good"]
        .iter()
        .any(|k| lower.contains(k))
    {
        themes.push(Theme::new("Positive Feedback", 0.7, 1));
    }

    if themes.is_empty() {
        themes.push(Theme::new("General Feedback", 0.0, 1));
    }

    let theme_names: Vec<&str> = themes.iter().map(|t| t.name.as_str()).collect();
    let summary = if anomalies.is_empty() {
        format!(
            "Feedback analysis identifies {} key theme(s): {}. Overall sentiment indicates areas for improvement.",
            themes.len(),
            theme_names.join(", ")
        )
    } else {
        format!(
            "Critical issues identified: {}. Key themes include {}. Immediate attention required for stability concerns.",
            anomalies.join(", "),
            theme_names[..theme_names.len().min(3)].join(", ")
        )
    };

    Insights {
        themes,
        anomalies,
        summary,
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
