use crate::{
    AppState,
    auth::AuthUser,
    error::{AppError, ErrorResponse},
    forms,
    models::{
        ActionResponse, AuthResponse, InviteRequest, LoginRequest, Notice, RegisterRequest,
        ReportRequest, ReportResponse, Role, SubmittedReport,
    },
    navigation::{Chrome, DASHBOARD_PATH, LOGIN_PATH, Resolution, normalize_path},
    views::{self, BinFilter, Page, View, ViewRequest, authority, citizen},
};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

// --- Navigation ---

/// NavQuery
///
/// Query parameters understood by application pages. Only the map reads one.
#[derive(Debug, Default, Deserialize)]
pub struct NavQuery {
    pub status: Option<String>,
}

/// navigate
///
/// [Fallback] Every application path lands here. The guard state is read once,
/// the route table decides, and the answer is either a `303` to the redirect target
/// or the rendered page document. The requested path is never remembered across a
/// redirect to the login page.
pub async fn navigate(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    query: Result<Query<NavQuery>, QueryRejection>,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    // A malformed query only affects the map filter; it never blocks the guard.
    let query = match query {
        Ok(Query(query)) => query,
        Err(e) => {
            tracing::debug!(error = %e, "ignoring unreadable navigation query");
            NavQuery::default()
        }
    };

    let path = normalize_path(uri.path()).to_string();
    let (guard, session) = state.session.observe().await;

    match state.routes.resolve(&path, guard) {
        Resolution::Loading => Json(Page {
            path,
            navbar: None,
            view: View::Loading,
        })
        .into_response(),
        Resolution::Redirect { to } => {
            tracing::debug!(from = %path, to = %to, ?guard, "navigation redirected");
            Redirect::to(to).into_response()
        }
        Resolution::Render { view, chrome } => {
            let request = ViewRequest {
                path: path.clone(),
                map_filter: BinFilter::parse(query.status.as_deref()),
            };
            let navbar = match (chrome, session.as_ref()) {
                (Chrome::WithNavbar, Some(session)) => Some(views::navbar(session, &path)),
                _ => None,
            };
            let view = views::render(view, session.as_ref(), &request);
            Json(Page { path, navbar, view }).into_response()
        }
    }
}

// --- Auth Actions ---

/// login
///
/// [Public Route] Signs in with one of the demo accounts. A rejected login leaves
/// any existing session untouched and answers `401` with a notice.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Missing fields", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    forms::validate_login(&payload)?;

    let session = state
        .auth
        .login_session(&payload.email, &payload.password, payload.role)
        .await
        .ok_or_else(|| AppError::Authentication {
            notice: Notice::failure(
                "Error",
                "Invalid credentials. Try citizen@demo.com or authority@demo.com",
            ),
        })?;

    Ok(Json(AuthResponse {
        session,
        notice: Notice::info("Success!", "Welcome back!"),
        redirect: DASHBOARD_PATH.to_string(),
    }))
}

/// register
///
/// [Public Route] Creates a new identity and signs it in. Never rejects a
/// well-formed form.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registered", body = AuthResponse),
        (status = 422, description = "Missing fields", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    forms::validate_register(&payload)?;

    let session = state
        .auth
        .register_session(&payload.name, &payload.email, &payload.password, payload.role)
        .await;

    Ok(Json(AuthResponse {
        session,
        notice: Notice::info("Success!", "Welcome to EcoWaste!"),
        redirect: DASHBOARD_PATH.to_string(),
    }))
}

/// logout
///
/// [Public Route] Idempotent: succeeds whether or not anyone is signed in.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 200, description = "Signed out", body = ActionResponse))
)]
pub async fn logout(State(state): State<AppState>) -> Json<ActionResponse> {
    state.auth.logout().await;
    Json(ActionResponse {
        notice: Notice::info("Signed out", "See you soon."),
        redirect: Some(LOGIN_PATH.to_string()),
    })
}

// --- Citizen Actions ---

/// submit_report
///
/// [Citizen Route] Accepts an issue report after inline validation and the simulated
/// submission delay. Reports are acknowledged, not stored.
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = ReportRequest,
    responses(
        (status = 201, description = "Report accepted", body = ReportResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 403, description = "Not a citizen", body = ErrorResponse),
        (status = 422, description = "Invalid fields", body = ErrorResponse)
    )
)]
pub async fn submit_report(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<ReportRequest>,
) -> Result<(StatusCode, Json<ReportResponse>), AppError> {
    let session = user.require_role(Role::Citizen)?;
    forms::validate_report(&payload)?;

    if !state.config.simulated_delay.is_zero() {
        tokio::time::sleep(state.config.simulated_delay).await;
    }

    let report = SubmittedReport {
        id: Uuid::new_v4(),
        reporter_id: session.id,
        title: payload.title.trim().to_string(),
        location: payload.location.trim().to_string(),
        description: payload.description.trim().to_string(),
        image: payload.image.filter(|name| !name.trim().is_empty()),
        submitted_at: Utc::now(),
    };
    tracing::info!(report_id = %report.id, reporter = %session.id, "issue report accepted");

    Ok((
        StatusCode::CREATED,
        Json(ReportResponse {
            report,
            notice: Notice::info("Issue reported", "Thank you for helping keep the city clean."),
            redirect: DASHBOARD_PATH.to_string(),
        }),
    ))
}

/// redeem_reward
///
/// [Citizen Route] Exchanges points for a catalogue reward. The balance check uses
/// the session's points; `409` when they fall short.
#[utoipa::path(
    post,
    path = "/api/rewards/{id}/redeem",
    params(("id" = u32, Path, description = "Reward ID")),
    responses(
        (status = 200, description = "Redeemed", body = ActionResponse),
        (status = 404, description = "Unknown reward", body = ErrorResponse),
        (status = 409, description = "Not enough points", body = ErrorResponse)
    )
)]
pub async fn redeem_reward(
    user: AuthUser,
    Path(id): Path<u32>,
) -> Result<Json<ActionResponse>, AppError> {
    let session = user.require_role(Role::Citizen)?;
    let notice = citizen::redeem(&session, id)?;
    Ok(Json(ActionResponse {
        notice,
        redirect: None,
    }))
}

// --- Authority Actions ---

/// invite_user
///
/// [Authority Route] Sends (pretends to send) an invitation email.
#[utoipa::path(
    post,
    path = "/api/users/invite",
    request_body = InviteRequest,
    responses(
        (status = 200, description = "Invite sent", body = ActionResponse),
        (status = 422, description = "Invalid email", body = ErrorResponse)
    )
)]
pub async fn invite_user(
    user: AuthUser,
    Json(payload): Json<InviteRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    user.require_role(Role::Authority)?;
    forms::validate_invite(&payload)?;

    Ok(Json(ActionResponse {
        notice: Notice::info(
            "Invite sent",
            format!("Invitation email sent to {}", payload.email.trim()),
        ),
        redirect: None,
    }))
}

/// promote_user
///
/// [Authority Route] Acknowledges promoting a directory user to authority.
#[utoipa::path(
    post,
    path = "/api/users/{id}/promote",
    params(("id" = u32, Path, description = "Directory user ID")),
    responses(
        (status = 200, description = "Promoted", body = ActionResponse),
        (status = 404, description = "Unknown user", body = ErrorResponse)
    )
)]
pub async fn promote_user(
    user: AuthUser,
    Path(id): Path<u32>,
) -> Result<Json<ActionResponse>, AppError> {
    user.require_role(Role::Authority)?;
    let notice = authority::promote(id)?;
    Ok(Json(ActionResponse {
        notice,
        redirect: None,
    }))
}

/// remove_user
///
/// [Authority Route] Acknowledges removing a directory user.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = u32, Path, description = "Directory user ID")),
    responses(
        (status = 200, description = "Removed", body = ActionResponse),
        (status = 404, description = "Unknown user", body = ErrorResponse)
    )
)]
pub async fn remove_user(
    user: AuthUser,
    Path(id): Path<u32>,
) -> Result<Json<ActionResponse>, AppError> {
    user.require_role(Role::Authority)?;
    let notice = authority::remove(id)?;
    Ok(Json(ActionResponse {
        notice,
        redirect: None,
    }))
}
