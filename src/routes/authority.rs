use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{delete, post},
};

/// Authority Router Module
///
/// User management actions behind the Users page.
pub fn authority_routes() -> Router<AppState> {
    Router::new()
        // POST /users/invite
        .route("/users/invite", post(handlers::invite_user))
        // POST /users/{id}/promote
        .route("/users/{id}/promote", post(handlers::promote_user))
        // DELETE /users/{id}
        .route("/users/{id}", delete(handlers::remove_user))
}
