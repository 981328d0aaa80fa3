//! Injection pattern detectors.
//!
//! High-recall, low-precision heuristics run against every string that
//! enters the gateway. A positive is grounds to reject the request, not a
//! parse of the payload; parameterized queries and output encoding at the
//! data layer remain the primary defense.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static SQL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Keyword bounded by start-of-input/whitespace on the left and
        // whitespace on the right, so "John Doe" and e-mail addresses pass.
        r"(?i)(\s|^)(SELECT|INSERT|UPDATE|DELETE|DROP|CREATE|ALTER|TRUNCATE|EXEC|EXECUTE|UNION|OR|AND)\s",
        r"--",
        r";",
        r"/\*",
        r"\*/",
        // SQL Server extended procedure prefix.
        r"(?i)xp_",
        r"(?i)0x[0-9a-f]+",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("invalid SQL pattern"))
    .collect()
});

static XSS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?is)<script\b.*?</script>",
        r"(?i)javascript:",
        // Word boundary keeps words merely containing "on" from matching.
        r"(?i)\bon\w+\s*=",
        r"(?i)vbscript:",
        r"(?i)expression\s*\(",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("invalid XSS pattern"))
    .collect()
});

/// Returns true if the input trips any SQL injection signature.
pub fn contains_sql_injection(input: &str) -> bool {
    SQL_PATTERNS.iter().any(|p| p.is_match(input))
}

/// Returns true if the input trips any XSS signature.
pub fn contains_xss(input: &str) -> bool {
    XSS_PATTERNS.iter().any(|p| p.is_match(input))
}

/// Recursively apply a string predicate to every string leaf of a JSON
/// value. Arrays are checked element-wise, objects value-wise; numbers,
/// booleans and null never match.
pub fn value_matches(value: &Value, pred: fn(&str) -> bool) -> bool {
    match value {
        Value::String(s) => pred(s),
        Value::Array(items) => items.iter().any(|item| value_matches(item, pred)),
        Value::Object(map) => map.values().any(|item| value_matches(item, pred)),
        _ => false,
    }
}
