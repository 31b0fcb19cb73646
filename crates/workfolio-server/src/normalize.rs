//! Input sanitization applied before any value reaches persistence.
//! Pure functions, no I/O.

use chrono::NaiveDate;
use serde_json::Value;

/// Short labels: titles, locations, availability and similar.
pub const MAX_SHORT: usize = 140;
/// Free-form text: summaries, descriptions, legacy fallbacks.
pub const MAX_LONG: usize = 2000;
/// Individual skill/certification entries.
pub const MAX_TAG: usize = 120;

/// Trims surrounding whitespace and truncates to `max` characters on a
/// char boundary.
pub fn clamp_str(raw: &str, max: usize) -> String {
    let trimmed = raw.trim();
    match trimmed.char_indices().nth(max) {
        Some((idx, _)) => trimmed[..idx].to_string(),
        None => trimmed.to_string(),
    }
}

/// Coerces a submitted value for a numeric field. `None` means "unset":
/// null, empty string, non-numeric input and non-finite results all clear
/// the field rather than erroring.
pub fn number_or_unset(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}

/// Lenient date parsing for profile entries. A 7-character `YYYY-MM` value
/// is expanded to the first day of that month. Anything unparseable maps to
/// `None`; the caller treats that as "no date" rather than an error.
pub fn flexible_date(value: &Value) -> Option<NaiveDate> {
    let raw = value.as_str()?.trim();
    if raw.is_empty() {
        return None;
    }

    let expanded;
    let candidate = if raw.len() == 7 {
        expanded = format!("{raw}-01");
        &expanded
    } else {
        raw
    };

    NaiveDate::parse_from_str(candidate, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(candidate)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
