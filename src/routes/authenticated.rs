use crate::{AppState, handlers};
use axum::{Router, routing::post};

/// Authenticated Router Module
///
/// Citizen actions. Every handler takes the `AuthUser` extractor and narrows it
/// with `require_role(Role::Citizen)`.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // POST /reports
        // Issue report form. Validated inline, acknowledged with 201 after the simulated delay.
        .route("/reports", post(handlers::submit_report))
        // POST /rewards/{id}/redeem
        // Spends points on a catalogue reward. 409 when the balance falls short.
        .route("/rewards/{id}/redeem", post(handlers::redeem_reward))
}
