//! Partial-update resolution for profile scalars: a submitted body is turned
//! into an explicit set/unset plan against the writable-field catalog.

use serde_json::{Map, Value};

use crate::error::AppError;
use crate::normalize::{clamp_str, number_or_unset, MAX_LONG, MAX_SHORT};

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Text { max: usize },
    Number,
}

pub struct FieldSpec {
    /// Name as submitted on the wire.
    pub name: &'static str,
    /// Storage column the value lands in.
    pub column: &'static str,
    pub kind: FieldKind,
}

/// Profile scalars reachable through the generic PATCH path. Credentials
/// (username, email, password) are deliberately absent: they are immutable
/// or have their own flows, and unknown names are ignored rather than
/// rejected.
pub const WRITABLE_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "phone", column: "phone", kind: FieldKind::Text { max: MAX_SHORT } },
    FieldSpec { name: "address", column: "address", kind: FieldKind::Text { max: MAX_SHORT } },
    FieldSpec { name: "locationText", column: "location_text", kind: FieldKind::Text { max: MAX_SHORT } },
    FieldSpec { name: "avatarUrl", column: "avatar_url", kind: FieldKind::Text { max: MAX_LONG } },
    FieldSpec { name: "title", column: "title", kind: FieldKind::Text { max: MAX_SHORT } },
    FieldSpec { name: "summary", column: "summary", kind: FieldKind::Text { max: MAX_LONG } },
    FieldSpec { name: "hourlyRate", column: "hourly_rate", kind: FieldKind::Number },
    FieldSpec { name: "availability", column: "availability", kind: FieldKind::Text { max: MAX_SHORT } },
    FieldSpec { name: "jobType", column: "job_type", kind: FieldKind::Text { max: MAX_SHORT } },
    // Plain-text fallbacks kept for backward compatibility; new clients use
    // the experience/education item CRUD instead.
    FieldSpec { name: "education", column: "education", kind: FieldKind::Text { max: MAX_LONG } },
    FieldSpec { name: "experience", column: "experience", kind: FieldKind::Text { max: MAX_LONG } },
];

#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Text(String),
    Number(f64),
}

/// Mutation description produced by [`resolve`]. Columns come from the
/// static catalog, so the plan can be spliced into SQL directly; each entry
/// applies independently of the others.
#[derive(Debug, Default)]
pub struct UpdatePlan {
    pub set: Vec<(&'static str, ScalarValue)>,
    pub unset: Vec<&'static str>,
}

impl UpdatePlan {
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.unset.is_empty()
    }
}

/// Resolves a submitted field map into an [`UpdatePlan`]. Absent fields are
/// untouched, present-but-empty fields are unset, everything else is
/// normalized and set. Rejects a plan that would write nothing.
pub fn resolve(body: &Map<String, Value>) -> Result<UpdatePlan, AppError> {
    let mut plan = UpdatePlan::default();

    for (key, raw) in body {
        let Some(spec) = WRITABLE_FIELDS.iter().find(|f| f.name == key) else {
            continue;
        };

        match spec.kind {
            FieldKind::Number => match number_or_unset(raw) {
                Some(n) => plan.set.push((spec.column, ScalarValue::Number(n))),
                None => plan.unset.push(spec.column),
            },
            FieldKind::Text { max } => match raw {
                Value::Null => plan.unset.push(spec.column),
                Value::String(s) => {
                    let cleaned = clamp_str(s, max);
                    if cleaned.is_empty() {
                        plan.unset.push(spec.column);
                    } else {
                        plan.set.push((spec.column, ScalarValue::Text(cleaned)));
                    }
                }
                _ => {
                    return Err(AppError::Validation(format!(
                        "Field '{key}' must be a string"
                    )))
                }
            },
        }
    }

    if plan.is_empty() {
        return Err(AppError::Validation("No valid fields to update".to_string()));
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn absent_fields_are_untouched() {
        let plan = resolve(&body(json!({ "title": "Engineer" }))).unwrap();
        assert_eq!(plan.set, vec![("title", ScalarValue::Text("Engineer".into()))]);
        assert!(plan.unset.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let plan = resolve(&body(json!({
            "title": "Engineer",
            "username": "intruder",
            "password": "nope",
            "bogus": 1
        })))
        .unwrap();
        assert_eq!(plan.set.len(), 1);
        assert_eq!(plan.set[0].0, "title");
    }

    #[test]
    fn empty_and_null_values_unset() {
        let plan = resolve(&body(json!({ "phone": "", "summary": null, "address": "   " }))).unwrap();
        assert!(plan.set.is_empty());
        let mut unset = plan.unset.clone();
        unset.sort_unstable();
        assert_eq!(unset, vec!["address", "phone", "summary"]);
    }

    #[test]
    fn hourly_rate_empty_string_unsets() {
        let plan = resolve(&body(json!({ "hourlyRate": "" }))).unwrap();
        assert!(plan.set.is_empty());
        assert_eq!(plan.unset, vec!["hourly_rate"]);
    }

    #[test]
    fn hourly_rate_parses_numbers_and_numeric_strings() {
        let plan = resolve(&body(json!({ "hourlyRate": "55.5" }))).unwrap();
        assert_eq!(plan.set, vec![("hourly_rate", ScalarValue::Number(55.5))]);

        let plan = resolve(&body(json!({ "hourlyRate": 80 }))).unwrap();
        assert_eq!(plan.set, vec![("hourly_rate", ScalarValue::Number(80.0))]);

        // unparseable input clears instead of erroring
        let plan = resolve(&body(json!({ "hourlyRate": "lots" }))).unwrap();
        assert_eq!(plan.unset, vec!["hourly_rate"]);
    }

    #[test]
    fn text_values_are_trimmed_and_clamped() {
        let plan = resolve(&body(json!({ "title": "  Senior Engineer  " }))).unwrap();
        assert_eq!(plan.set, vec![("title", ScalarValue::Text("Senior Engineer".into()))]);

        let long = "x".repeat(500);
        let plan = resolve(&body(json!({ "title": long }))).unwrap();
        match &plan.set[0].1 {
            ScalarValue::Text(s) => assert_eq!(s.len(), 140),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn wire_names_map_to_storage_columns() {
        let plan = resolve(&body(json!({ "locationText": "Berlin", "jobType": "contract" }))).unwrap();
        let columns: Vec<_> = plan.set.iter().map(|(c, _)| *c).collect();
        assert!(columns.contains(&"location_text"));
        assert!(columns.contains(&"job_type"));
    }

    #[test]
    fn legacy_fallback_fields_remain_writable() {
        let plan = resolve(&body(json!({ "education": "BSc CS", "experience": "" }))).unwrap();
        assert_eq!(plan.set, vec![("education", ScalarValue::Text("BSc CS".into()))]);
        assert_eq!(plan.unset, vec!["experience"]);
    }

    #[test]
    fn non_string_for_text_field_is_rejected() {
        assert!(resolve(&body(json!({ "title": 42 }))).is_err());
        assert!(resolve(&body(json!({ "summary": ["a"] }))).is_err());
    }

    #[test]
    fn empty_plan_is_rejected() {
        let err = resolve(&body(json!({}))).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "No valid fields to update"));

        // only unknown names submitted
        let err = resolve(&body(json!({ "nope": "x" }))).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
