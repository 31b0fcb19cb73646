use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

use crate::auth::auth_middleware;
use crate::config::Config;
use crate::db::DbPool;
use crate::handlers::{
    auth as auth_handlers, avatar as avatar_handlers, directory as directory_handlers,
    education as education_handlers, experience as experience_handlers,
    options as options_handlers, profile as profile_handlers,
};
use crate::images::ImageStore;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    pub images: Arc<dyn ImageStore>,
}

pub fn create_router(db: DbPool, config: Config, images: Arc<dyn ImageStore>) -> Router {
    let upload_dir = config.upload_dir.clone();
    let state = AppState { db, config, images };

    // Public auth routes (no middleware)
    let public_auth_routes = Router::new()
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login));

    // Protected auth routes (need auth)
    let protected_auth_routes = Router::new()
        .route("/me", get(auth_handlers::me))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let auth_routes = Router::new()
        .merge(public_auth_routes)
        .merge(protected_auth_routes);

    // Directory, options and profile reads are public
    let public_user_routes = Router::new()
        .route("/userslist", get(directory_handlers::list_users))
        .route("/search", get(directory_handlers::search_users))
        .route("/options", get(options_handlers::profile_options))
        .route("/profile/:id", get(profile_handlers::get_profile));

    // Profile mutations require the owner's token
    let protected_user_routes = Router::new()
        .route("/profile/:id", patch(profile_handlers::update_profile))
        .route("/profile/:id/arrays", patch(profile_handlers::update_arrays))
        .route(
            "/profile/:id/experience",
            post(experience_handlers::add_experience),
        )
        .route(
            "/profile/:id/experience/:item_id",
            put(experience_handlers::update_experience)
                .delete(experience_handlers::delete_experience),
        )
        .route(
            "/profile/:id/education",
            post(education_handlers::add_education),
        )
        .route(
            "/profile/:id/education/:item_id",
            put(education_handlers::update_education)
                .delete(education_handlers::delete_education),
        )
        .route("/profile/:id/photo", post(avatar_handlers::upload_photo))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let user_routes = Router::new()
        .merge(public_user_routes)
        .merge(protected_user_routes);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes)
        .nest("/api/user", user_routes)
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        // profile forms and avatar uploads can be big-ish
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
