//! Lexicon-based sentiment scoring.
//!
//! A deliberately small polarity scorer: feedback text is tokenized, each
//! token is matched against a weighted lexicon, a preceding negator flips
//! the sign, and the mean polarity of matched tokens becomes the score.
//!
//! Labels use fixed thresholds: `> 0.1` positive, `< -0.1` negative,
//! otherwise neutral.

use crate::types::SentimentScore;

/// Words that flip the polarity of the following sentiment word.
const NEGATORS: &[&str] = &["not", "no", "never", "hardly", "barely", "isnt", "dont", "cant", "wont"];

/// Weighted polarity lexicon. Weights are in [-1.0, 1.0].
const LEXICON: &[(&str, f64)] = &[
    // Positive
    ("love", 0.9),
    ("excellent", 0.9),
    ("amazing", 0.9),
    ("fantastic", 0.9),
    ("great", 0.8),
    ("awesome", 0.8),
    ("perfect", 0.8),
    ("wonderful", 0.8),
    ("good", 0.6),
    ("nice", 0.5),
    ("helpful", 0.5),
    ("useful", 0.5),
    ("fast", 0.4),
    ("easy", 0.4),
    ("intuitive", 0.4),
    ("reliable", 0.4),
    ("smooth", 0.4),
    ("like", 0.3),
    ("works", 0.3),
    ("clean", 0.3),
    // Negative
    ("terrible", -0.9),
    ("horrible", -0.9),
    ("awful", -0.9),
    ("hate", -0.9),
    ("crash", -0.8),
    ("crashes", -0.8),
    ("broken", -0.8),
    ("unusable", -0.8),
    ("worst", -0.8),
    ("bug", -0.6),
    ("bugs", -0.6),
    ("error", -0.6),
    ("errors", -0.6),
    ("fails", -0.6),
    ("failed", -0.6),
    ("bad", -0.6),
    ("slow", -0.5),
    ("laggy", -0.5),
    ("confusing", -0.5),
    ("annoying", -0.5),
    ("frustrating", -0.5),
    ("difficult", -0.4),
    ("missing", -0.3),
    ("problem", -0.3),
    ("issue", -0.3),
];

/// Score the sentiment of `text` and attach a three-way label.
///
/// The polarity is the mean weight of matched lexicon tokens, clamped to
/// [-1.0, 1.0]. Text with no sentiment-bearing words scores 0.0 / neutral.
pub fn analyze_sentiment(text: &str) -> SentimentScore {
    let tokens: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|t| t.replace('\'', ""))
        .filter(|t| !t.is_empty())
        .collect();

    let mut total = 0.0;
    let mut hits = 0u32;

    for (i, token) in tokens.iter().enumerate() {
        let Some(&(_, weight)) = LEXICON.iter().find(|(w, _)| w == token) else {
            continue;
        };
        let negated = i > 0 && NEGATORS.contains(&tokens[i - 1].as_str());
        total += if negated { -weight } else { weight };
        hits += 1;
    }

    let sentiment = if hits == 0 {
        0.0
    } else {
        (total / f64::from(hits)).clamp(-1.0, 1.0)
    };

    SentimentScore {
        sentiment,
        label: label_for(sentiment).to_string(),
    }
}

/// Fixed thresholds: > 0.1 positive, < -0.1 negative, else neutral.
fn label_for(sentiment: f64) -> &'static str {
    if sentiment > 0.1 {
        "positive"
    } else if sentiment < -0.1 {
        "negative"
    } else {
        "neutral"
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_feedback() {
        let score = analyze_sentiment("I love this app, it's great and easy to use");
        assert!(score.sentiment > 0.1);
        assert_eq!(score.label, "positive");
    }

    #[test]
    fn test_negative_feedback() {
        let score = analyze_sentiment("The app crashes constantly and is full of bugs");
        assert!(score.sentiment < -0.1);
        assert_eq!(score.label, "negative");
    }

    #[test]
    fn test_neutral_feedback() {
        let score = analyze_sentiment("I opened the settings page yesterday");
        assert_eq!(score.sentiment, 0.0);
        assert_eq!(score.label, "neutral");
    }

    #[test]
    fn test_negation_flips_polarity() {
        let plain = analyze_sentiment("this is good");
        let negated = analyze_sentiment("this is not good");
        assert!(plain.sentiment > 0.0);
        assert!(negated.sentiment < 0.0);
    }

    #[test]
    fn test_score_is_bounded() {
        let score = analyze_sentiment("terrible horrible awful hate crash broken worst");
        assert!(score.sentiment >= -1.0);
        assert_eq!(score.label, "negative");
    }

    #[test]
    fn test_empty_text_is_neutral() {
        let score = analyze_sentiment("");
        assert_eq!(score.sentiment, 0.0);
        assert_eq!(score.label, "neutral");
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(label_for(0.1), "neutral");
        assert_eq!(label_for(0.11), "positive");
        assert_eq!(label_for(-0.1), "neutral");
        assert_eq!(label_for(-0.11), "negative");
    }
}
