use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::{Map, Value};
use sqlx::types::Json as Jsonb;
use uuid::Uuid;
use workfolio_shared::{EducationItem, ProfileResponse};

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::profile::items;
use crate::profile::projection::{UserRow, PROJECTION_COLUMNS};
use crate::routes::AppState;

async fn load_items(state: &AppState, id: Uuid) -> Result<Vec<EducationItem>, AppError> {
    let row: Option<(Jsonb<Vec<EducationItem>>,)> =
        sqlx::query_as("SELECT education_items FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?;

    row.map(|(items,)| items.0).ok_or(AppError::UserNotFound)
}

async fn store_items(
    state: &AppState,
    id: Uuid,
    items: Vec<EducationItem>,
) -> Result<UserRow, AppError> {
    let sql = format!(
        "UPDATE users SET education_items = $2, updated_at = NOW() \
         WHERE id = $1 RETURNING {PROJECTION_COLUMNS}"
    );
    let row: UserRow = sqlx::query_as(&sql)
        .bind(id)
        .bind(Jsonb(items))
        .fetch_one(&state.db)
        .await?;

    Ok(row)
}

/// POST /api/user/profile/:id/education
pub async fn add_education(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<ProfileResponse>, AppError> {
    super::ensure_owner(&user, id)?;

    let mut entries = load_items(&state, id).await?;
    items::append(&mut entries, &body)?;

    let row = store_items(&state, id, entries).await?;
    Ok(Json(row.into()))
}

/// PUT /api/user/profile/:id/education/:item_id
pub async fn update_education(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<ProfileResponse>, AppError> {
    super::ensure_owner(&user, id)?;

    let mut entries = load_items(&state, id).await?;
    items::update(&mut entries, item_id, &body)?;

    let row = store_items(&state, id, entries).await?;
    Ok(Json(row.into()))
}

/// DELETE /api/user/profile/:id/education/:item_id
pub async fn delete_education(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ProfileResponse>, AppError> {
    super::ensure_owner(&user, id)?;

    let mut entries = load_items(&state, id).await?;
    items::delete(&mut entries, item_id)?;

    let row = store_items(&state, id, entries).await?;
    Ok(Json(row.into()))
}
