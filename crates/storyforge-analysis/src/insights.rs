//! Structured insights generation.
//!
//! Providers are asked for a `{themes, anomalies, summary}` object but
//! routinely omit keys, stringify numbers, or send fractional counts.
//! Everything the provider gets wrong is coerced or backfilled here, so
//! callers always see a complete, well-typed structure.

use serde_json::Value;
use tracing::{debug, info};

use storyforge_core::types::{InsightsResponse, Theme};
use storyforge_core::utils::timestamp;
use storyforge_core::Shape;
use storyforge_providers::Orchestrator;

use crate::prompts::insights_prompt;

/// Generate structured insights from feedback text.
///
/// Always shape-complete: missing fields are backfilled and malformed
/// theme entries coerced to sane defaults.
pub async fn generate_insights(orchestrator: &Orchestrator, feedback: &str) -> InsightsResponse {
    let prompt = insights_prompt(feedback);
    let result = orchestrator.generate(&prompt, Shape::JsonObject).await;

    info!(
        source = result.source.tag(),
        attempts = result.attempts.len(),
        "insights generated"
    );

    let value = result
        .content
        .as_json()
        .cloned()
        .unwrap_or_else(|| Value::Object(Default::default()));

    let themes = coerce_themes(value.get("themes"));
    let anomalies = coerce_anomalies(value.get("anomalies"));
    let summary = value
        .get("summary")
        .and_then(Value::as_str)
        .unwrap_or("Analysis completed")
        .to_string();

    InsightsResponse {
        themes,
        anomalies,
        summary,
        timestamp: timestamp(),
        source: result.source.tag().to_string(),
        model: result.source.model().map(str::to_string),
        reason: result.source.reason(),
    }
}

/// Coerce the raw `themes` value into well-typed entries.
///
/// Per entry: missing name becomes "Unknown", sentiment is parsed from a
/// number or numeric string (else 0.0), count likewise (else 1).
fn coerce_themes(raw: Option<&Value>) -> Vec<Theme> {
    let Some(Value::Array(entries)) = raw else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let obj = entry.as_object()?;
            let name = obj
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("Unknown")
                .to_string();
            let sentiment = coerce_f64(obj.get("sentiment")).unwrap_or(0.0);
            let count = coerce_i64(obj.get("count")).unwrap_or(1);
            Some(Theme {
                name,
                sentiment,
                count,
            })
        })
        .collect()
}

fn coerce_anomalies(raw: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(entries)) = raw else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| entry.as_str().map(str::to_string))
        .collect()
}

fn coerce_f64(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        other => {
            debug!(value = %other, "non-numeric sentiment in theme");
            None
        }
    }
}

fn coerce_i64(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
