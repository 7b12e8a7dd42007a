//! Snapshot field helpers shared by every validator

use regex::Regex;
use serde_json::Value;
use shared::models::ValidationResult;
use std::sync::LazyLock;
use validator::{ValidateEmail, ValidateUrl};

static SLUG_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").ok());

/// 10 digits, optional `+` and 1–3 digit country code
static PHONE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\+\d{1,3})?\d{10}$").ok());

/// Navigate a dotted path (`"a.b.0.c"`). Numeric segments index arrays.
pub fn lookup<'a>(snapshot: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(snapshot, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// `null`, blank strings and empty collections count as absent
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(_) => true,
    }
}

/// Record `path` as completed when present, as missing when required and
/// absent. Optional absent fields are left out of both lists.
pub fn check_field(
    snapshot: &Value,
    path: &str,
    required: bool,
    result: &mut ValidationResult,
) -> bool {
    let present = is_present(lookup(snapshot, path));
    if present {
        result.mark_completed(path);
    } else if required {
        result.mark_missing(path);
    }
    present
}

/// `round(100 * completed / total)`, 100 when there is nothing to complete
pub fn completion_percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = (100.0 * completed.min(total) as f64 / total as f64).round();
    pct as u8
}

/// Non-blank string value at `path`
pub fn str_at<'a>(snapshot: &'a Value, path: &str) -> Option<&'a str> {
    lookup(snapshot, path)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Numbers and numeric strings; non-finite values are rejected
pub fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// `isActive` flag of a record; records without the flag are active
pub fn is_active(record: &Value) -> bool {
    record
        .get("isActive")
        .and_then(Value::as_bool)
        .unwrap_or(true)
}

/// Records of a collection, or `None` when the key is absent or not an array
pub fn records<'a>(snapshot: &'a Value, path: &str) -> Option<&'a [Value]> {
    lookup(snapshot, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
}

pub fn is_valid_email(email: &str) -> bool {
    email.trim().validate_email()
}

/// Absolute http(s) URL
pub fn is_valid_url(url: &str) -> bool {
    let url = url.trim();
    (url.starts_with("http://") || url.starts_with("https://")) && url.validate_url()
}

/// Spaces, dashes, dots and parentheses are ignored
pub fn is_valid_phone(phone: &str) -> bool {
    let digits: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();
    PHONE_PATTERN
        .as_ref()
        .is_some_and(|re| re.is_match(&digits))
}

/// Lowercase letters, digits and hyphens only
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_PATTERN.as_ref().is_some_and(|re| re.is_match(slug))
}
