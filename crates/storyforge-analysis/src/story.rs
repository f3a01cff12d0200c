//! User story generation.

use tracing::info;

use storyforge_core::types::StoryResponse;
use storyforge_core::Shape;
use storyforge_providers::Orchestrator;

use crate::prompts::story_prompt;

/// Generate a Jira-style user story from feedback text.
///
/// Always returns a usable story: either a provider response tagged with
/// its source and model, or the keyword-themed fallback tagged with a
/// reason.
pub async fn generate_story(orchestrator: &Orchestrator, feedback: &str) -> StoryResponse {
    let prompt = story_prompt(feedback);
    let result = orchestrator.generate(&prompt, Shape::FreeText).await;

    info!(
        source = result.source.tag(),
        attempts = result.attempts.len(),
        "story generated"
    );

    StoryResponse {
        story: result.content.as_text(),
        source: result.source.tag().to_string(),
        model: result.source.model().map(str::to_string),
        reason: result.source.reason(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use storyforge_providers::retry::RetryPolicy;

    use crate::testutil::{one_shot_provider, orchestrator_with};

    #[tokio::test]
    async fn test_provider_story_is_tagged_with_model() {
        let provider = one_shot_provider("openai", "gpt-4o-mini", Ok("As a user, I want...".into()));
        let orch = orchestrator_with(vec![provider]);

        let response = generate_story(&orch, "dark mode please").await;
        assert_eq!(response.story, "As a user, I want...");
        assert_eq!(response.source, "openai");
        assert_eq!(response.model.as_deref(), Some("gpt-4o-mini"));
        assert!(response.reason.is_none());
    }

    #[tokio::test]
    async fn test_forced_fallback_story_is_themed_from_feedback() {
        let orch = Orchestrator::new(
            Vec::new(),
            RetryPolicy::default(),
            true,
            Duration::from_secs(60),
        );

        let response = generate_story(&orch, "the app crashes on startup").await;
        assert_eq!(response.source, "fallback");
        assert!(response.model.is_none());
        assert!(response.reason.is_some());
        // Themed by the feedback, not the instruction wrapper
        assert!(response.story.contains("fix stability issues"));
    }

    #[tokio::test]
    async fn test_failed_providers_fall_back_with_reason() {
        let provider = one_shot_provider(
            "openai",
            "gpt-4o-mini",
            Err(storyforge_core::ProviderError::Permission("401".into())),
        );
        let orch = orchestrator_with(vec![provider]);

        let response = generate_story(&orch, "everything is slow").await;
        assert_eq!(response.source, "fallback");
        assert!(response.reason.unwrap().contains("failed"));
        assert!(response.story.contains("optimize performance"));
    }
}
