//! JSON extraction from unstructured model output.
//!
//! Models asked for "ONLY valid JSON" still wrap their answer in markdown
//! fences, prepend prose, or leave trailing commas. Recovery steps, in
//! order:
//!
//! 1. Strip markdown code-fence markers (```` ```json ```` and ```` ``` ````).
//! 2. Trim everything before the first `{` and after the last `}`.
//! 3. Parse as JSON; on failure, remove trailing commas before `}`/`]` and
//!    reparse once.
//! 4. Still failing: return `None` — the caller treats it as an attempt
//!    failure, never a crash.

use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```(?:json)?\s*").expect("valid fence regex"))
}

fn trailing_comma_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",\s*([}\]])").expect("valid trailing-comma regex"))
}

/// Extract a JSON object from text that may contain markdown fences or
/// surrounding prose. Returns `None` if no object can be recovered.
pub fn extract_json(text: &str) -> Option<serde_json::Value> {
    if text.trim().is_empty() {
        return None;
    }

    // Strip markdown code fences
    let stripped = fence_re().replace_all(text, "");
    let stripped = stripped.trim();

    // Trim to the outermost braces
    let start = stripped.find('{')?;
    let end = stripped.rfind('}')?;
    if end < start {
        return None;
    }
    let candidate = &stripped[start..=end];

    match serde_json::from_str::<serde_json::Value>(candidate) {
        Ok(value) if value.is_object() => {
            debug!("extracted JSON object from model output");
            Some(value)
        }
        Ok(_) => None,
        Err(first_err) => {
            // Common repair: trailing commas before } or ]
            let repaired = trailing_comma_re().replace_all(candidate, "$1");
            match serde_json::from_str::<serde_json::Value>(&repaired) {
                Ok(value) if value.is_object() => {
                    debug!("extracted JSON object after trailing-comma repair");
                    Some(value)
                }
                _ => {
                    let mut end = candidate.len().min(120);
                    while !candidate.is_char_boundary(end) {
                        end -= 1;
                    }
                    warn!(
                        error = %first_err,
                        head = %&candidate[..end],
                        "failed to parse JSON from model output"
                    );
                    None
                }
            }
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
