use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{EducationItem, ExperienceItem};

/// Externally visible profile representation. Built only by the read
/// projection: it never carries the password hash, the avatar storage
/// reference, or the legacy plain-text education/experience fallbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
    /// Legacy alias kept for older clients; always mirrors `certifications`.
    pub certificates: Vec<String>,
    pub experience_items: Vec<ExperienceItem>,
    pub education_items: Vec<EducationItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
