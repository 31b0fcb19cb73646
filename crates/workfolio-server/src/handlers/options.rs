use axum::Json;
use workfolio_shared::api::ProfileOptions;

pub const AVAILABILITY_CHOICES: &[&str] =
    &["open", "actively-looking", "not-looking", "unavailable"];

pub const JOB_TYPE_CHOICES: &[&str] =
    &["full-time", "part-time", "contract", "internship", "freelance"];

pub const WORK_MODE_CHOICES: &[&str] = &["remote", "on site", "hybrid"];

fn owned(choices: &[&str]) -> Vec<String> {
    choices.iter().map(|s| s.to_string()).collect()
}

/// GET /api/user/options
pub async fn profile_options() -> Json<ProfileOptions> {
    Json(ProfileOptions {
        availability: owned(AVAILABILITY_CHOICES),
        job_types: owned(JOB_TYPE_CHOICES),
        work_modes: owned(WORK_MODE_CHOICES),
    })
}
