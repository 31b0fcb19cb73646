//! Read-side projection from the stored user row to the public profile
//! representation.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use uuid::Uuid;
use workfolio_shared::{EducationItem, ExperienceItem, ProfileResponse};

/// Columns fetched for every profile read. The password hash, the avatar
/// storage reference and the legacy education/experience fallbacks are never
/// selected, so no read path can leak them.
pub const PROJECTION_COLUMNS: &str = "id, username, email, phone, address, location_text, \
     avatar_url, title, summary, hourly_rate, availability, job_type, \
     skills, certifications, experience_items, education_items, \
     created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub location_text: Option<String>,
    pub avatar_url: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub hourly_rate: Option<f64>,
    pub availability: Option<String>,
    pub job_type: Option<String>,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
    pub experience_items: Json<Vec<ExperienceItem>>,
    pub education_items: Json<Vec<EducationItem>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for ProfileResponse {
    fn from(row: UserRow) -> Self {
        // the alias duplication for older clients happens only here, at the
        // projection boundary; storage holds a single collection
        let certificates = row.certifications.clone();

        ProfileResponse {
            id: row.id,
            username: row.username,
            email: row.email,
            phone: row.phone,
            address: row.address,
            location_text: row.location_text,
            avatar_url: row.avatar_url,
            title: row.title,
            summary: row.summary,
            hourly_rate: row.hourly_rate,
            availability: row.availability,
            job_type: row.job_type,
            skills: row.skills,
            certifications: row.certifications,
            certificates,
            experience_items: row.experience_items.0,
            education_items: row.education_items.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            phone: None,
            address: None,
            location_text: Some("Berlin".to_string()),
            avatar_url: None,
            title: Some("Engineer".to_string()),
            summary: None,
            hourly_rate: Some(80.0),
            availability: Some("open".to_string()),
            job_type: None,
            skills: vec!["Rust".to_string()],
            certifications: vec!["CKA".to_string()],
            experience_items: Json(vec![ExperienceItem::new(Uuid::new_v4())]),
            education_items: Json(Vec::new()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn projection_never_contains_a_password() {
        let profile = ProfileResponse::from(sample_row());
        let value = serde_json::to_value(&profile).unwrap();
        let object = value.as_object().unwrap();

        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("passwordHash"));
        assert!(!object.contains_key("avatarId"));
    }

    #[test]
    fn certifications_are_mirrored_under_the_legacy_alias() {
        let profile = ProfileResponse::from(sample_row());
        assert_eq!(profile.certifications, profile.certificates);

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["certifications"], value["certificates"]);
    }

    #[test]
    fn items_flatten_to_camel_case_records() {
        let profile = ProfileResponse::from(sample_row());
        let value = serde_json::to_value(&profile).unwrap();

        let item = &value["experienceItems"][0];
        assert!(item.get("id").is_some());
        assert!(item.get("workMode").is_some());
        assert_eq!(value["educationItems"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn unset_scalars_are_absent_from_the_serialized_form() {
        let mut row = sample_row();
        row.hourly_rate = None;
        let value = serde_json::to_value(ProfileResponse::from(row)).unwrap();
        assert!(value.as_object().unwrap().get("hourlyRate").is_none());
    }
}
