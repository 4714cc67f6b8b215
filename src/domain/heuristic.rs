//! Default Value Heuristic
//!
//! Guesses a plausible literal from a field's name when the user has not
//! supplied one. Rules are checked in table order against the lowercased
//! key; the first rule with a matching substring wins.

use serde_json::{json, Map, Value};

use super::field::FieldKind;

const FALLBACK_TEXT: &str = "sample text";
const FALLBACK_NUMBER: f64 = 42.0;

const STRING_RULES: &[(&[&str], &str)] = &[
    (&["name"], "John Doe"),
    (&["email"], "john.doe@example.com"),
    (&["city"], "New York"),
    (&["street"], "123 Main Street"),
    (&["phone"], "+1-555-0123"),
    (&["address"], "123 Main Street"),
    (&["description"], "This is a sample description"),
    (&["title"], "Sample Title"),
];

const NUMBER_RULES: &[(&[&str], f64)] = &[
    (&["age"], 25.0),
    (&["price", "cost"], 99.99),
    (&["lat", "latitude"], 40.7128),
    (&["lng", "longitude"], -74.006),
    (&["id"], 12345.0),
    (&["count", "quantity"], 10.0),
];

/// Default literal for a field of `kind` named `key`. Total and deterministic.
pub fn default_for(kind: FieldKind, key: &str) -> Value {
    let key = key.to_lowercase();
    match kind {
        FieldKind::String => json!(first_match(STRING_RULES, &key).unwrap_or(FALLBACK_TEXT)),
        FieldKind::Number => json_number(first_match(NUMBER_RULES, &key).unwrap_or(FALLBACK_NUMBER)),
        FieldKind::Nested => Value::Object(Map::new()),
    }
}

fn first_match<T: Copy>(rules: &[(&[&str], T)], key: &str) -> Option<T> {
    rules
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| key.contains(needle)))
        .map(|(_, value)| *value)
}

/// JSON number for `n`: integral values become integers, so `25.0` is
/// written as `25`. Non-finite input becomes `0`.
pub fn json_number(n: f64) -> Value {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if n.fract() == 0.0 && n.abs() < MAX_EXACT {
        return json!(n as i64);
    }
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or_else(|| json!(0))
}
