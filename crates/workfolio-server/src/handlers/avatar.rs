use axum::{
    extract::{Multipart, Path, State},
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;
use workfolio_shared::api::AvatarResponse;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::images::{ImageFormat, MAX_AVATAR_BYTES};
use crate::profile::projection::{UserRow, PROJECTION_COLUMNS};
use crate::routes::AppState;

/// POST /api/user/profile/:id/photo
///
/// Multipart upload under the `file` field. JPEG/PNG only, 5 MB cap. The
/// previous avatar is deleted from the store after the replacement is
/// persisted.
pub async fn upload_photo(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<AvatarResponse>, AppError> {
    super::ensure_owner(&user, id)?;

    let mut upload: Option<(ImageFormat, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let format = field
            .content_type()
            .and_then(ImageFormat::from_content_type)
            .ok_or_else(|| AppError::Validation("Only JPG and PNG allowed".to_string()))?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?;

        upload = Some((format, data.to_vec()));
        break;
    }

    let Some((format, data)) = upload else {
        return Err(AppError::Validation("No file uploaded".to_string()));
    };

    if data.is_empty() {
        return Err(AppError::Validation("No file uploaded".to_string()));
    }
    if data.len() > MAX_AVATAR_BYTES {
        return Err(AppError::Validation("File exceeds the 5 MB limit".to_string()));
    }

    // Current storage reference, so the replaced image can be cleaned up
    let previous: Option<(Option<String>,)> =
        sqlx::query_as("SELECT avatar_id FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?;

    let (previous_id,) = previous.ok_or(AppError::UserNotFound)?;

    let image_id = format!("user_{}_{}", id, Utc::now().timestamp_millis());
    let stored = state
        .images
        .upload(&data, "profilepic", &image_id, format)
        .await?;

    let sql = format!(
        "UPDATE users SET avatar_url = $2, avatar_id = $3, updated_at = NOW() \
         WHERE id = $1 RETURNING {PROJECTION_COLUMNS}"
    );
    let row: UserRow = sqlx::query_as(&sql)
        .bind(id)
        .bind(&stored.public_url)
        .bind(&stored.storage_id)
        .fetch_one(&state.db)
        .await?;

    if let Some(old) = previous_id {
        if old != stored.storage_id {
            if let Err(e) = state.images.delete(&old).await {
                tracing::warn!("Failed to delete replaced avatar {}: {}", old, e);
            }
        }
    }

    Ok(Json(AvatarResponse {
        avatar_url: stored.public_url,
        user: row.into(),
    }))
}
