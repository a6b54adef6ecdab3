use crate::{AppState, handlers};
use axum::{Router, routing::post};

/// Public Router Module
///
/// Auth actions available to anyone. Logout is here too so a stale client can
/// always sign out.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // POST /auth/login
        // Demo credential check. On success the session is installed and persisted.
        .route("/auth/login", post(handlers::login))
        // POST /auth/register
        // Creates a fresh citizen or authority identity with zero points.
        .route("/auth/register", post(handlers::register))
        // POST /auth/logout
        .route("/auth/logout", post(handlers::logout))
}
