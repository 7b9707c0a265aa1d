//! Tolerant readers for loosely-typed JSON values.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde_json::Value;

/// Numeric-looking text: optional currency code or symbol, optional
/// thousands separators, optional trailing currency code.
static NUMBER_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:[A-Za-z]{3}\s*)?[$€£¥₹]?\s*(-?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?)\s*(?:[A-Za-z]{3})?\s*$",
    )
    .unwrap()
});

/// Number from a JSON number or a numeric-looking string
pub fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(raw) => {
            let caps = NUMBER_LIKE.captures(raw)?;
            caps.get(1)?.as_str().replace(',', "").parse().ok()?
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Number or 0 when absent or unreadable
pub fn number_or_zero(value: Option<&Value>) -> f64 {
    value.and_then(number).unwrap_or(0.0)
}

/// Non-negative whole number (page, size, total)
pub fn count(value: &Value) -> Option<u64> {
    let n = number(value)?;
    (n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64).then_some(n as u64)
}

/// Identifier from a string or a number
pub fn id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Trimmed, non-empty text; numbers and booleans are rendered
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// RFC 3339 timestamp, `YYYY-MM-DD HH:MM:SS` (UTC) or bare `YYYY-MM-DD`
pub fn date(value: &Value) -> Option<DateTime<Utc>> {
    let raw = value.as_str()?.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
