//! Literal/Value Inference
//!
//! Turns the right-hand side of an assignment into a [`Value`] using an ordered,
//! first-match strategy chain:
//!
//! 1. numeric literal (`double` when the text contains `.`, otherwise `int`)
//! 2. quoted string literal (first and last character stripped, no escapes)
//! 3. bracketed literal, split flat on commas (no nesting awareness)
//! 4. reference to a variable already in the environment
//! 5. the opaque placeholder
//!
//! Arithmetic, calls and method chains all land on the placeholder. Nothing is
//! evaluated.

use std::collections::BTreeMap;

use super::value::Value;

/// Variable name to last inferred value, live for one synthesis run.
pub type Environment = BTreeMap<String, Value>;

/// Infer the value of an assignment's right-hand side.
pub fn infer_value(rhs: &str, env: &Environment) -> Value {
    let text = rhs.trim().replace(';', "");
    let text = text.trim();

    if let Some(number) = parse_number(text) {
        return number;
    }

    if text.starts_with('"') || text.starts_with('\'') {
        return Value::Text(strip_delimiters(text).to_string());
    }

    if text.contains('[') || text.contains('{') {
        if let Some(items) = parse_list(text) {
            return Value::List(items);
        }
    }

    if let Some(existing) = env.get(text) {
        return existing.clone();
    }

    Value::Opaque
}

/// Numeric literal: `double` if the text contains a `.`, else a 32-bit `int`.
pub fn parse_number(text: &str) -> Option<Value> {
    if text.contains('.') {
        parse_double(text).map(Value::Double)
    } else {
        text.parse::<i32>().ok().map(Value::Int)
    }
}

fn parse_double(text: &str) -> Option<f64> {
    let text = text.trim();
    if let Ok(d) = text.parse::<f64>() {
        return Some(d);
    }
    // `1.5f` / `2.0d` literals
    text.strip_suffix(['f', 'F', 'd', 'D'])
        .and_then(|body| body.parse::<f64>().ok())
}

fn strip_delimiters(text: &str) -> &str {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// Parse a bracketed literal into its top-level items.
///
/// Takes the text between the first `[` and the last `]` and splits it on every
/// comma, so `[[1,2],[3,4]]` yields the four raw items `[1`, `2]`, `[3`, `4]`.
/// A brace-only literal (`{1, 2}`) yields an empty list. Returns `None` when a
/// `[` has no closing `]` after it.
pub fn parse_list(text: &str) -> Option<Vec<Value>> {
    let Some(open) = text.find('[') else {
        return Some(Vec::new());
    };
    let close = text.rfind(']')?;
    if close <= open {
        return None;
    }

    let content = &text[open + 1..close];
    let items = split_fields(content, ',')
        .into_iter()
        .map(|item| parse_element(item.trim()))
        .collect();
    Some(items)
}

fn parse_element(item: &str) -> Value {
    parse_number(item).unwrap_or_else(|| Value::Text(item.replace(['"', '\''], "")))
}

/// Split on `sep`, dropping trailing empty fields.
///
/// Text without any separator is returned whole, even when empty, so `""`
/// yields one empty field while `","` yields none.
pub fn split_fields(text: &str, sep: char) -> Vec<&str> {
    let mut parts: Vec<&str> = text.split(sep).collect();
    if parts.len() == 1 {
        return parts;
    }
    while parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    parts
}
