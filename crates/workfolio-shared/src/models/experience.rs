use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Work arrangement label for an experience entry. `Unspecified` serializes
/// as an empty string so forms can submit a cleared selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkMode {
    #[serde(rename = "remote")]
    Remote,
    #[serde(rename = "on site")]
    OnSite,
    #[serde(rename = "hybrid")]
    Hybrid,
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

/// One work-experience entry embedded in a user profile. The id is assigned
/// when the entry is appended and stays stable for addressing updates and
/// deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceItem {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Set when the position is current; an absent end date with `ongoing`
    /// false means the end date is simply unknown.
    #[serde(default)]
    pub ongoing: bool,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub work_mode: WorkMode,
    #[serde(default)]
    pub description: String,
}

impl ExperienceItem {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            title: String::new(),
            company: String::new(),
            start_date: None,
            end_date: None,
            ongoing: false,
            location: String::new(),
            work_mode: WorkMode::Unspecified,
            description: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_mode_labels_round_trip() {
        for (mode, label) in [
            (WorkMode::Remote, "\"remote\""),
            (WorkMode::OnSite, "\"on site\""),
            (WorkMode::Hybrid, "\"hybrid\""),
            (WorkMode::Unspecified, "\"\""),
        ] {
            assert_eq!(serde_json::to_string(&mode).unwrap(), label);
            let parsed: WorkMode = serde_json::from_str(label).unwrap();
            assert_eq!(parsed, mode);
        }
    }

    #[test]
    fn item_without_ongoing_flag_still_deserializes() {
        let raw = r#"{"id":"7f0bd5a5-6f8e-4e23-a53c-6a35a0a8d5f2","title":"Engineer"}"#;
        let item: ExperienceItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.title, "Engineer");
        assert!(!item.ongoing);
        assert_eq!(item.work_mode, WorkMode::Unspecified);
    }
}
