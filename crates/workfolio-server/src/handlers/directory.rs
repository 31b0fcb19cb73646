use axum::{
    extract::{Query, State},
    Json,
};
use workfolio_shared::api::SearchParams;
use workfolio_shared::ProfileResponse;

use crate::error::AppError;
use crate::profile::projection::{UserRow, PROJECTION_COLUMNS};
use crate::routes::AppState;

/// GET /api/user/userslist
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfileResponse>>, AppError> {
    let sql = format!("SELECT {PROJECTION_COLUMNS} FROM users ORDER BY username");
    let rows: Vec<UserRow> = sqlx::query_as(&sql).fetch_all(&state.db).await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// GET /api/user/search?searchTerm=
///
/// Case-insensitive substring match over username or email. A blank term
/// falls back to the full directory.
pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ProfileResponse>>, AppError> {
    let term = params
        .search_term
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_string();

    if term.is_empty() {
        return list_users(State(state)).await;
    }

    let sql = format!(
        "SELECT {PROJECTION_COLUMNS} FROM users \
         WHERE username ILIKE $1 OR email ILIKE $1 \
         ORDER BY username"
    );
    let rows: Vec<UserRow> = sqlx::query_as(&sql)
        .bind(like_pattern(&term))
        .fetch_all(&state.db)
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("alice"), "%alice%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
