//! Input sanitization.
//!
//! Normalizes untrusted strings before they reach business logic: trim,
//! strip ASCII control characters, cap length. Sanitization never rejects;
//! hostile content that survives it is handled by the detectors.

use serde_json::Value;

/// Maximum length of a sanitized string, in characters.
pub const MAX_STRING_LEN: usize = 10_000;

/// HTML-escape the characters that matter for markup injection.
/// Each character maps to exactly one entity, single pass.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '`' => out.push_str("&#x60;"),
            '=' => out.push_str("&#x3D;"),
            _ => out.push(c),
        }
    }
    out
}

// 0x00-0x08, 0x0B, 0x0C, 0x0E-0x1F, 0x7F. Tab, LF and CR survive.
fn is_stripped_control(c: char) -> bool {
    matches!(c,
        '\u{0000}'..='\u{0008}'
        | '\u{000B}'
        | '\u{000C}'
        | '\u{000E}'..='\u{001F}'
        | '\u{007F}')
}

/// Trim, strip control characters, then truncate to [`MAX_STRING_LEN`].
pub fn sanitize_string(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !is_stripped_control(*c))
        .take(MAX_STRING_LEN)
        .collect()
}

/// Recursively sanitize every string leaf of a JSON value. Arrays are
/// sanitized element-wise, objects value-wise; numbers, booleans and null
/// pass through unchanged. The input is not mutated.
pub fn sanitize_json(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(sanitize_string(s)),
        Value::Array(items) => Value::Array(items.iter().map(sanitize_json).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), sanitize_json(item)))
                .collect(),
        ),
        other => other.clone(),
    }
}
