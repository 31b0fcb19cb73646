use std::sync::OnceLock;

use axum::{extract::State, Extension, Json};
use regex::Regex;
use uuid::Uuid;
use workfolio_shared::api::{AuthResponse, LoginRequest, RegisterRequest};
use workfolio_shared::ProfileResponse;

use crate::auth::{create_access_token, hash_password, verify_password, AuthUser};
use crate::error::AppError;
use crate::profile::projection::{UserRow, PROJECTION_COLUMNS};
use crate::routes::AppState;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

fn validate_registration(username: &str, email: &str, password: &str) -> Result<(), AppError> {
    if username.is_empty() {
        return Err(AppError::Validation("Username is required".to_string()));
    }
    if !email_regex().is_match(email) {
        return Err(AppError::Validation("A valid email is required".to_string()));
    }
    if password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    Ok(())
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let username = req.username.trim().to_string();
    let email = req.email.trim().to_lowercase();

    validate_registration(&username, &email, &req.password)?;

    // Uniqueness is checked before any write happens
    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE username = $1")
        .bind(&username)
        .fetch_optional(&state.db)
        .await?;

    if existing.is_some() {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }

    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;

    if existing.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = hash_password(&req.password)?;
    let user_id = Uuid::new_v4();

    let sql = format!(
        "INSERT INTO users (id, username, email, password_hash) VALUES ($1, $2, $3, $4) \
         RETURNING {PROJECTION_COLUMNS}"
    );
    let row: UserRow = sqlx::query_as(&sql)
        .bind(user_id)
        .bind(&username)
        .bind(&email)
        .bind(&password_hash)
        .fetch_one(&state.db)
        .await?;

    let token = create_access_token(
        user_id,
        &username,
        &state.config.jwt_secret,
        state.config.jwt_expires_in,
    )?;

    Ok(Json(AuthResponse {
        token,
        user: row.into(),
    }))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let row: Option<(Uuid, String)> =
        sqlx::query_as("SELECT id, password_hash FROM users WHERE username = $1")
            .bind(req.username.trim())
            .fetch_optional(&state.db)
            .await?;

    let (user_id, password_hash) = row.ok_or(AppError::Unauthorized)?;

    if !verify_password(&req.password, &password_hash)? {
        return Err(AppError::Unauthorized);
    }

    let user = super::fetch_profile_row(&state, user_id).await?;

    let token = create_access_token(
        user_id,
        &user.username,
        &state.config.jwt_secret,
        state.config.jwt_expires_in,
    )?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>, AppError> {
    let row = super::fetch_profile_row(&state, user.id).await?;
    Ok(Json(row.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_rules() {
        assert!(validate_registration("alice", "alice@x.com", "p@ss1234").is_ok());
        assert!(validate_registration("", "alice@x.com", "p@ss1234").is_err());
        assert!(validate_registration("alice", "not-an-email", "p@ss1234").is_err());
        assert!(validate_registration("alice", "alice@x", "p@ss1234").is_err());
        assert!(validate_registration("alice", "alice@x.com", "short").is_err());
    }
}
