use std::sync::Arc;

use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Session core: state, guard, auth operations, persistence.
pub mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod models;
pub mod session;
pub mod storage;

// Navigation policy and page rendering.
pub mod forms;
pub mod handlers;
pub mod navigation;
pub mod views;

// Action endpoints grouped by caller (public, citizen, authority).
pub mod routes;
use auth::{AuthService, AuthUser};
use routes::{authenticated, authority, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use navigation::RouteTable;
pub use session::SessionContext;
pub use storage::{FileLocalStorage, MockLocalStorage, StorageState};

/// ApiDoc
///
/// OpenAPI document for the action endpoints, served at `/api-docs/openapi.json`.
/// Navigation pages are not listed; they are plain `GET`s on application paths.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::login, handlers::register, handlers::logout,
        handlers::submit_report, handlers::redeem_reward,
        handlers::invite_user, handlers::promote_user, handlers::remove_user
    ),
    components(
        schemas(
            models::Role, models::Session, models::Notice, models::NoticeVariant,
            models::LoginRequest, models::RegisterRequest, models::ReportRequest,
            models::InviteRequest, models::AuthResponse, models::ActionResponse,
            models::SubmittedReport, models::ReportResponse, error::ErrorResponse,
        )
    ),
    tags(
        (name = "ecowaste", description = "EcoWaste citizen and authority portal")
    )
)]
struct ApiDoc;

/// AppState
///
/// Everything a request can reach. The session context is shared (all clones see the
/// same session); the route table and config are immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub session: SessionContext,
    pub auth: AuthService,
    pub routes: Arc<RouteTable>,
    pub config: AppConfig,
}

impl AppState {
    /// Wires a fresh, still-loading session context over `storage`. Call
    /// `session.restore()` before (or concurrently with) serving.
    pub fn new(config: AppConfig, storage: StorageState) -> Self {
        let session = SessionContext::new(storage);
        let auth = AuthService::new(session.clone(), config.simulated_delay);
        let routes = Arc::new(RouteTable::canonical(config.unmatched_route));
        Self {
            session,
            auth,
            routes,
            config,
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for SessionContext {
    fn from_ref(app_state: &AppState) -> SessionContext {
        app_state.session.clone()
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(app_state: &AppState) -> AuthService {
        app_state.auth.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Rejects requests with no signed-in session before they reach a handler. The
/// `AuthUser` extractor does the work; its rejection is a `401`.
async fn auth_middleware(_auth_user: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the app shell: docs, health, `/api` actions, and the navigation
/// fallback that serves every other path.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let protected = authenticated::authenticated_routes()
        .merge(authority::authority_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api = Router::new()
        .merge(public::public_routes())
        .merge(protected);

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // GET /health
        .route("/health", get(|| async { "ok" }))
        .nest("/api", api)
        .fallback(handlers::navigate)
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span for one request, tagged with its `x-request-id` so all log lines of a
/// navigation or action correlate.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
