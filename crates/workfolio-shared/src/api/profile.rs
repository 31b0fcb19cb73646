use serde::{Deserialize, Serialize};

use crate::ProfileResponse;

/// Add/remove deltas for the tag-like profile collections. Every list
/// defaults to empty so clients can target a single collection.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArraysRequest {
    #[serde(default)]
    pub add_skills: Vec<String>,
    #[serde(default)]
    pub remove_skills: Vec<String>,
    #[serde(default)]
    pub add_certificates: Vec<String>,
    #[serde(default)]
    pub remove_certificates: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarResponse {
    pub avatar_url: String,
    pub user: ProfileResponse,
}
