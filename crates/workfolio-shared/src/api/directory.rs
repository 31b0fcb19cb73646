use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(rename = "searchTerm", skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
}

/// Static enumerated choices offered by the profile edit forms.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileOptions {
    pub availability: Vec<String>,
    pub job_types: Vec<String>,
    pub work_modes: Vec<String>,
}
