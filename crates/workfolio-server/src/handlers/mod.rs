pub mod auth;
pub mod avatar;
pub mod directory;
pub mod education;
pub mod experience;
pub mod options;
pub mod profile;

use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::profile::projection::{UserRow, PROJECTION_COLUMNS};
use crate::routes::AppState;

/// Mutations may only target the authenticated user's own profile.
fn ensure_owner(user: &AuthUser, id: Uuid) -> Result<(), AppError> {
    if user.id != id {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

async fn fetch_profile_row(state: &AppState, id: Uuid) -> Result<UserRow, AppError> {
    let sql = format!("SELECT {PROJECTION_COLUMNS} FROM users WHERE id = $1");
    let row: Option<UserRow> = sqlx::query_as(&sql)
        .bind(id)
        .fetch_optional(&state.db)
        .await?;

    row.ok_or(AppError::UserNotFound)
}
