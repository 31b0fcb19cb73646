use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::{Map, Value};
use uuid::Uuid;
use workfolio_shared::api::UpdateArraysRequest;
use workfolio_shared::ProfileResponse;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::profile::arrays;
use crate::profile::fields::{self, ScalarValue};
use crate::profile::projection::{UserRow, PROJECTION_COLUMNS};
use crate::routes::AppState;

/// GET /api/user/profile/:id
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, AppError> {
    let row = super::fetch_profile_row(&state, id).await?;
    Ok(Json(row.into()))
}

/// PATCH /api/user/profile/:id
///
/// Generic partial update over the writable scalar catalog: absent fields
/// stay untouched, empty/null fields are cleared.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<ProfileResponse>, AppError> {
    super::ensure_owner(&user, id)?;

    let plan = fields::resolve(&body)?;

    // Build the update statement from the resolved plan. Column names come
    // from the static catalog, values are bound.
    let mut assignments = vec!["updated_at = NOW()".to_string()];
    let mut param_idx = 2;

    for (column, _) in &plan.set {
        assignments.push(format!("{column} = ${param_idx}"));
        param_idx += 1;
    }
    for column in &plan.unset {
        assignments.push(format!("{column} = NULL"));
    }

    let sql = format!(
        "UPDATE users SET {} WHERE id = $1 RETURNING {PROJECTION_COLUMNS}",
        assignments.join(", ")
    );

    let mut query = sqlx::query_as::<_, UserRow>(&sql).bind(id);
    for (_, value) in &plan.set {
        query = match value {
            ScalarValue::Text(s) => query.bind(s.clone()),
            ScalarValue::Number(n) => query.bind(*n),
        };
    }

    let row = query
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::UserNotFound)?;

    Ok(Json(row.into()))
}

/// PATCH /api/user/profile/:id/arrays
///
/// Add/remove reconciliation for skills and certificates. The stored
/// collections are re-read and rewritten whole; concurrent edits are
/// last-write-wins by design.
pub async fn update_arrays(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateArraysRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    super::ensure_owner(&user, id)?;

    let skill_ops = arrays::reconcile(&req.add_skills, &req.remove_skills);
    let cert_ops = arrays::reconcile(&req.add_certificates, &req.remove_certificates);

    if skill_ops.is_empty() && cert_ops.is_empty() {
        return Err(AppError::Validation("No array changes provided".to_string()));
    }

    let current: Option<(Vec<String>, Vec<String>)> =
        sqlx::query_as("SELECT skills, certifications FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?;

    let (skills, certifications) = current.ok_or(AppError::UserNotFound)?;

    let skills = arrays::apply(&skills, &skill_ops);
    let certifications = arrays::apply(&certifications, &cert_ops);

    let sql = format!(
        "UPDATE users SET skills = $2, certifications = $3, updated_at = NOW() \
         WHERE id = $1 RETURNING {PROJECTION_COLUMNS}"
    );
    let row: UserRow = sqlx::query_as(&sql)
        .bind(id)
        .bind(&skills)
        .bind(&certifications)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(row.into()))
}
