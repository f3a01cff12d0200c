//! The combined analysis pipeline: sentiment, user story, and insights
//! for one piece of feedback.

use tracing::info;

use storyforge_core::sentiment::analyze_sentiment;
use storyforge_core::types::FeedbackAnalysis;
use storyforge_providers::Orchestrator;

use crate::insights::generate_insights;
use crate::story::generate_story;

/// Run the full analysis for one feedback text.
///
/// Sentiment is computed locally; story and insights go through the
/// orchestrator and may come from a provider or the fallback.
pub async fn analyze_feedback(orchestrator: &Orchestrator, text: &str) -> FeedbackAnalysis {
    let sentiment = analyze_sentiment(text);
    info!(label = %sentiment.label, "sentiment analyzed");

    let story = generate_story(orchestrator, text).await;
    let insights = generate_insights(orchestrator, text).await;

    FeedbackAnalysis {
        text: text.to_string(),
        sentiment,
        story,
        insights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::testutil::{one_shot_provider, orchestrator_with};

    #[tokio::test]
    async fn test_full_analysis_composes_all_three_parts() {
        // FreeText call sees the story, JsonObject call sees... the same
        // scripted body, which fails JSON extraction and falls back. Both
        // outcomes are valid shapes.
        let provider = one_shot_provider(
            "openai",
            "gpt-4o-mini",
            Ok("**User Story:** As a user, I want fewer crashes.".to_string()),
        );
        let orch = orchestrator_with(vec![provider]);

        let analysis = analyze_feedback(&orch, "the app crashes constantly, terrible").await;

        assert_eq!(analysis.text, "the app crashes constantly, terrible");
        assert_eq!(analysis.sentiment.label, "negative");
        assert_eq!(analysis.story.source, "openai");
        assert!(analysis.story.story.contains("fewer crashes"));
        // Insights fell back but are still shape-complete
        assert_eq!(analysis.insights.source, "fallback");
        assert!(!analysis.insights.themes.is_empty());
        assert!(!analysis.insights.summary.is_empty());
    }

    #[tokio::test]
    async fn test_analysis_never_fails_without_providers() {
        let orch = orchestrator_with(Vec::new());
        let analysis = analyze_feedback(&orch, "I love the new layout, great work").await;

        assert_eq!(analysis.sentiment.label, "positive");
        assert_eq!(analysis.story.source, "fallback");
        assert_eq!(analysis.insights.source, "fallback");
        assert!(analysis
            .insights
            .themes
            .iter()
            .any(|t| t.name == "Positive Feedback"));
    }
}
