//! CRUD over the structured collections embedded in a user profile
//! (experience and education entries). Items are addressed by the identity
//! assigned at append time; index positions are never exposed.

use serde_json::{Map, Value};
use uuid::Uuid;
use workfolio_shared::{EducationItem, ExperienceItem, WorkMode};

use crate::error::AppError;
use crate::normalize::{clamp_str, flexible_date, MAX_LONG, MAX_SHORT};

/// A structured entry living inside the user aggregate. Field application
/// follows the partial-update rules: unknown names are ignored, a present
/// empty/null value resets the field to its default.
pub trait SectionItem: Sized {
    /// Section label used in not-found messages ("Experience", "Education").
    const SECTION: &'static str;

    fn with_id(id: Uuid) -> Self;
    fn id(&self) -> Uuid;
    fn apply_field(&mut self, name: &str, value: &Value) -> Result<(), AppError>;
}

fn text_field(name: &str, value: &Value, max: usize) -> Result<String, AppError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(clamp_str(s, max)),
        _ => Err(AppError::Validation(format!("Field '{name}' must be a string"))),
    }
}

fn bool_field(name: &str, value: &Value) -> Result<bool, AppError> {
    match value {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(*b),
        _ => Err(AppError::Validation(format!("Field '{name}' must be a boolean"))),
    }
}

fn work_mode_field(value: &Value) -> Result<WorkMode, AppError> {
    if value.is_null() {
        return Ok(WorkMode::Unspecified);
    }
    serde_json::from_value(value.clone())
        .map_err(|_| AppError::Validation("Invalid work mode".to_string()))
}

impl SectionItem for ExperienceItem {
    const SECTION: &'static str = "Experience";

    fn with_id(id: Uuid) -> Self {
        ExperienceItem::new(id)
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply_field(&mut self, name: &str, value: &Value) -> Result<(), AppError> {
        match name {
            "title" => self.title = text_field(name, value, MAX_SHORT)?,
            "company" => self.company = text_field(name, value, MAX_SHORT)?,
            "location" => self.location = text_field(name, value, MAX_SHORT)?,
            "description" => self.description = text_field(name, value, MAX_LONG)?,
            "startDate" => self.start_date = flexible_date(value),
            "endDate" => self.end_date = flexible_date(value),
            "ongoing" => self.ongoing = bool_field(name, value)?,
            "workMode" => self.work_mode = work_mode_field(value)?,
            _ => {}
        }
        Ok(())
    }
}

impl SectionItem for EducationItem {
    const SECTION: &'static str = "Education";

    fn with_id(id: Uuid) -> Self {
        EducationItem::new(id)
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply_field(&mut self, name: &str, value: &Value) -> Result<(), AppError> {
        match name {
            "degree" => self.degree = text_field(name, value, MAX_SHORT)?,
            "school" => self.school = text_field(name, value, MAX_SHORT)?,
            "location" => self.location = text_field(name, value, MAX_SHORT)?,
            "description" => self.description = text_field(name, value, MAX_LONG)?,
            "startDate" => self.start_date = flexible_date(value),
            "endDate" => self.end_date = flexible_date(value),
            "ongoing" => self.ongoing = bool_field(name, value)?,
            _ => {}
        }
        Ok(())
    }
}

/// Builds a new item from the submitted fields and appends it at the end of
/// the collection. Missing fields stay at their defaults; there is no
/// required-field check beyond that.
pub fn append<T: SectionItem>(
    items: &mut Vec<T>,
    fields: &Map<String, Value>,
) -> Result<Uuid, AppError> {
    let mut item = T::with_id(Uuid::new_v4());
    for (name, value) in fields {
        item.apply_field(name, value)?;
    }
    let id = item.id();
    items.push(item);
    Ok(id)
}

/// Applies the submitted fields to the item with the given identity.
/// Remaining items keep their positions.
pub fn update<T: SectionItem>(
    items: &mut [T],
    id: Uuid,
    fields: &Map<String, Value>,
) -> Result<(), AppError> {
    let item = items
        .iter_mut()
        .find(|item| item.id() == id)
        .ok_or(AppError::ItemNotFound(T::SECTION))?;

    for (name, value) in fields {
        item.apply_field(name, value)?;
    }
    Ok(())
}

/// Removes the item with the given identity, preserving the order of the
/// survivors.
pub fn delete<T: SectionItem>(items: &mut Vec<T>, id: Uuid) -> Result<(), AppError> {
    let before = items.len();
    items.retain(|item| item.id() != id);
    if items.len() == before {
        return Err(AppError::ItemNotFound(T::SECTION));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn append_then_update_keeps_untouched_fields() {
        let mut items: Vec<ExperienceItem> = Vec::new();

        let id = append(&mut items, &fields(json!({ "title": "Engineer" }))).unwrap();
        update(&mut items, id, &fields(json!({ "company": "Acme" }))).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Engineer");
        assert_eq!(items[0].company, "Acme");
        assert_eq!(items[0].location, "");
        assert_eq!(items[0].start_date, None);
        assert_eq!(items[0].work_mode, WorkMode::Unspecified);
    }

    #[test]
    fn append_without_title_defaults_to_empty() {
        let mut items: Vec<ExperienceItem> = Vec::new();
        append(&mut items, &fields(json!({ "company": "Acme" }))).unwrap();
        assert_eq!(items[0].title, "");
    }

    #[test]
    fn append_places_items_at_the_end() {
        let mut items: Vec<EducationItem> = Vec::new();
        append(&mut items, &fields(json!({ "school": "first" }))).unwrap();
        append(&mut items, &fields(json!({ "school": "second" }))).unwrap();
        assert_eq!(items[0].school, "first");
        assert_eq!(items[1].school, "second");
    }

    #[test]
    fn identities_stay_valid_until_deletion() {
        let mut items: Vec<ExperienceItem> = Vec::new();
        let first = append(&mut items, &fields(json!({ "title": "a" }))).unwrap();
        let second = append(&mut items, &fields(json!({ "title": "b" }))).unwrap();

        update(&mut items, first, &fields(json!({ "title": "a2" }))).unwrap();
        delete(&mut items, first).unwrap();

        // the survivor is still addressable by its original identity
        update(&mut items, second, &fields(json!({ "title": "b2" }))).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "b2");
    }

    #[test]
    fn deleting_twice_reports_not_found() {
        let mut items: Vec<EducationItem> = Vec::new();
        let id = append(&mut items, &fields(json!({ "degree": "BSc" }))).unwrap();

        delete(&mut items, id).unwrap();
        let err = delete(&mut items, id).unwrap_err();
        assert!(matches!(err, AppError::ItemNotFound("Education")));
    }

    #[test]
    fn delete_of_unknown_id_leaves_collection_unchanged() {
        let mut items: Vec<EducationItem> = Vec::new();
        append(&mut items, &fields(json!({ "degree": "BSc" }))).unwrap();

        let err = delete(&mut items, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::ItemNotFound("Education")));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].degree, "BSc");
    }

    #[test]
    fn update_of_unknown_id_reports_section() {
        let mut items: Vec<ExperienceItem> = Vec::new();
        let err = update(&mut items, Uuid::new_v4(), &fields(json!({ "title": "x" }))).unwrap_err();
        assert!(matches!(err, AppError::ItemNotFound("Experience")));
    }

    #[test]
    fn dates_accept_year_month_input() {
        let mut items: Vec<ExperienceItem> = Vec::new();
        let id = append(
            &mut items,
            &fields(json!({ "title": "Engineer", "startDate": "2022-05", "endDate": "garbage" })),
        )
        .unwrap();

        assert_eq!(items[0].start_date, NaiveDate::from_ymd_opt(2022, 5, 1));
        // unparseable end date falls back to None instead of failing
        assert_eq!(items[0].end_date, None);

        update(&mut items, id, &fields(json!({ "endDate": "" }))).unwrap();
        assert_eq!(items[0].end_date, None);
    }

    #[test]
    fn present_empty_values_reset_to_defaults() {
        let mut items: Vec<ExperienceItem> = Vec::new();
        let id = append(
            &mut items,
            &fields(json!({ "title": "Engineer", "company": "Acme", "ongoing": true })),
        )
        .unwrap();

        update(&mut items, id, &fields(json!({ "company": "", "ongoing": null }))).unwrap();
        assert_eq!(items[0].company, "");
        assert!(!items[0].ongoing);
        // absent fields untouched
        assert_eq!(items[0].title, "Engineer");
    }

    #[test]
    fn work_mode_labels_are_validated() {
        let mut items: Vec<ExperienceItem> = Vec::new();
        let id = append(&mut items, &fields(json!({ "workMode": "on site" }))).unwrap();
        assert_eq!(items[0].work_mode, WorkMode::OnSite);

        update(&mut items, id, &fields(json!({ "workMode": "" }))).unwrap();
        assert_eq!(items[0].work_mode, WorkMode::Unspecified);

        let err = update(&mut items, id, &fields(json!({ "workMode": "submarine" }))).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn unknown_item_fields_are_ignored() {
        let mut items: Vec<EducationItem> = Vec::new();
        let id = append(&mut items, &fields(json!({ "degree": "BSc", "gpa": 4.0 }))).unwrap();
        update(&mut items, id, &fields(json!({ "mascot": "owl" }))).unwrap();
        assert_eq!(items[0].degree, "BSc");
    }
}
