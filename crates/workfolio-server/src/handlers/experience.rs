use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::{Map, Value};
use sqlx::types::Json as Jsonb;
use uuid::Uuid;
use workfolio_shared::{ExperienceItem, ProfileResponse};

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::profile::items;
use crate::profile::projection::{UserRow, PROJECTION_COLUMNS};
use crate::routes::AppState;

async fn load_items(state: &AppState, id: Uuid) -> Result<Vec<ExperienceItem>, AppError> {
    let row: Option<(Jsonb<Vec<ExperienceItem>>,)> =
        sqlx::query_as("SELECT experience_items FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?;

    row.map(|(items,)| items.0).ok_or(AppError::UserNotFound)
}

async fn store_items(
    state: &AppState,
    id: Uuid,
    items: Vec<ExperienceItem>,
) -> Result<UserRow, AppError> {
    let sql = format!(
        "UPDATE users SET experience_items = $2, updated_at = NOW() \
         WHERE id = $1 RETURNING {PROJECTION_COLUMNS}"
    );
    let row: UserRow = sqlx::query_as(&sql)
        .bind(id)
        .bind(Jsonb(items))
        .fetch_one(&state.db)
        .await?;

    Ok(row)
}

/// POST /api/user/profile/:id/experience
pub async fn add_experience(
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

/// PUT /api/user/profile/:id/experience/:item_id
pub async fn update_experience(
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

/// DELETE /api/user/profile/:id/experience/:item_id
pub async fn delete_experience(
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
