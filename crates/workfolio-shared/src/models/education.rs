use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One education entry embedded in a user profile. Same identity and
/// lifecycle rules as [`crate::ExperienceItem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationItem {
    pub id: Uuid,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub ongoing: bool,
    #[serde(default)]
    pub description: String,
}

impl EducationItem {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            degree: String::new(),
            school: String::new(),
            location: String::new(),
            start_date: None,
            end_date: None,
            ongoing: false,
            description: String::new(),
        }
    }
}
