//! Helpers for reading remote API error bodies.

use serde_json::Value;

/// Server-supplied `message` from a JSON error body, if any.
///
/// Accepts a non-empty string, or a list of strings (validation errors) which
/// is joined with `", "`. Anything else yields `None` so callers can fall back
/// to their own wording.
#[must_use]
pub fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("message")? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        Value::Array(items) => {
            let parts: Vec<&str> = items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "response_test.rs"]
mod tests;
