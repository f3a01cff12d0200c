//! Prompt builders for the analysis services.
//!
//! Each builder wraps the raw feedback text in task instructions and
//! carries the original text along as the prompt seed, so the fallback
//! layer themes its output from the feedback rather than from the
//! instructions.

use storyforge_core::Prompt;

const STORY_SYSTEM: &str = "You are a helpful product manager assistant that writes clear, \
     actionable Jira-style user stories with acceptance criteria.";

const INSIGHTS_SYSTEM: &str = "You are an AI that analyzes customer feedback and returns structured \
     JSON insights. Always return valid JSON only, no markdown or \
     additional text. Ensure all numbers are proper JSON numbers (not \
     strings).";

/// Prompt for turning one piece of feedback into a Jira-style user story.
pub fn story_prompt(feedback: &str) -> Prompt {
    let text = format!(
        "Write a Jira-style user story and acceptance criteria based on this customer feedback:\n\
         \n\
         \"{feedback}\"\n\
         \n\
         Format your response as:\n\
         **User Story:**\n\
         As a [user type], I want [goal] so that [benefit].\n\
         \n\
         **Acceptance Criteria:**\n\
         1. [Criterion 1]\n\
         2. [Criterion 2]\n\
         3. [Criterion 3]\n\
         \n\
         Keep it concise and actionable."
    );

    Prompt::new(text)
        .with_system(STORY_SYSTEM)
        .with_seed(feedback)
        .with_max_tokens(1024)
        .with_temperature(0.7)
}

/// Prompt for extracting structured insights (themes, anomalies, summary)
/// from one piece of feedback.
pub fn insights_prompt(feedback: &str) -> Prompt {
    let text = format!(
        "Analyze the following customer feedback and extract structured insights.\n\
         \n\
         Feedback: \"{feedback}\"\n\
         \n\
         Return a valid JSON object with this exact structure:\n\
         {{\n\
         \x20   \"themes\": [\n\
         \x20       {{\"name\": \"Theme Name\", \"sentiment\": -1.0 to 1.0, \"count\": number}},\n\
         \x20       ...\n\
         \x20   ],\n\
         \x20   \"anomalies\": [\"anomaly1\", \"anomaly2\", ...],\n\
         \x20   \"summary\": \"Brief summary of the feedback\"\n\
         }}\n\
         \n\
         Requirements:\n\
         - themes: Array of 3-5 key product themes with sentiment scores (-1.0 to 1.0) and count (integer)\n\
         - anomalies: Array of strings describing urgent issues or trends (can be empty)\n\
         - summary: A brief 1-2 sentence summary of the feedback\n\
         - Return ONLY valid JSON, no markdown, no additional text"
    );

    Prompt::new(text)
        .with_system(INSIGHTS_SYSTEM)
        .with_seed(feedback)
        .with_max_tokens(1024)
        .with_temperature(0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_prompt_carries_seed_and_instructions() {
        let prompt = story_prompt("the export button is broken");
        assert_eq!(prompt.seed_text(), "the export button is broken");
        assert!(prompt.text.contains("Jira-style user story"));
        assert!(prompt.text.contains("the export button is broken"));
        assert!(prompt.system.is_some());
        // Both services raise the 512 default for more detailed responses
        assert_eq!(prompt.max_tokens, 1024);
    }

    #[test]
    fn test_insights_prompt_demands_bare_json() {
        let prompt = insights_prompt("too slow");
        assert!(prompt.text.contains("ONLY valid JSON"));
        assert!(prompt.text.contains("\"themes\""));
        assert_eq!(prompt.temperature, 0.5);
        assert_eq!(prompt.seed_text(), "too slow");
    }
}
