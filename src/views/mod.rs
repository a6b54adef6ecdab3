//! View components.
//!
//! Each page is a plain serializable view model built from the (read-only) session.
//! How the display draws them is not this crate's concern.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{
    models::{Role, Session},
    navigation::{DASHBOARD_PATH, ViewId},
};

pub mod authority;
pub mod citizen;
pub mod shared;

pub use authority::{AnalyticsView, AuthorityDashboardView, UsersView};
pub use citizen::{BinsView, CitizenDashboardView, ReportFormView, RewardsView};
pub use shared::{AuthView, BinFilter, MapView, NotFoundView};

/// Page
///
/// Document returned for every rendered navigation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Page {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navbar: Option<Navbar>,
    pub view: View,
}

/// View
///
/// Tagged union of all page bodies; `view` names the page, `data` carries its model.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "view", content = "data", rename_all = "snake_case")]
#[ts(export)]
pub enum View {
    Loading,
    Auth(AuthView),
    CitizenDashboard(CitizenDashboardView),
    AuthorityDashboard(AuthorityDashboardView),
    Analytics(AnalyticsView),
    Report(ReportFormView),
    Bins(BinsView),
    Rewards(RewardsView),
    Map(MapView),
    Users(UsersView),
    NotFound(NotFoundView),
}

/// Per-navigation inputs beyond the session.
#[derive(Debug, Clone, Default)]
pub struct ViewRequest {
    pub path: String,
    pub map_filter: BinFilter,
}

/// Builds the body of `view` for the given session.
pub fn render(view: ViewId, session: Option<&Session>, request: &ViewRequest) -> View {
    match view {
        ViewId::Auth => View::Auth(shared::auth_view()),
        ViewId::CitizenDashboard => View::CitizenDashboard(citizen::dashboard(session)),
        ViewId::AuthorityDashboard => View::AuthorityDashboard(authority::dashboard()),
        ViewId::Analytics => View::Analytics(authority::analytics()),
        ViewId::Report => View::Report(citizen::report_form()),
        ViewId::Bins => View::Bins(citizen::bins()),
        ViewId::Rewards => View::Rewards(citizen::rewards(session)),
        ViewId::Map => View::Map(shared::map(request.map_filter)),
        ViewId::Users => View::Users(authority::users()),
        ViewId::NotFound => View::NotFound(shared::not_found(&request.path, session)),
    }
}

// --- Navbar ---

/// Navbar
///
/// Persistent navigation bar shown around every protected view.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Navbar {
    pub brand: String,
    pub links: Vec<NavLink>,
    pub user_name: String,
    pub role: Role,
    // Only citizens see their points badge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NavLink {
    pub label: String,
    pub path: String,
    pub active: bool,
}

const CITIZEN_LINKS: &[(&str, &str)] = &[
    ("Dashboard", DASHBOARD_PATH),
    ("Nearby Bins", "/bins"),
    ("Rewards", "/rewards"),
    ("Report Issue", "/report"),
];

const AUTHORITY_LINKS: &[(&str, &str)] = &[
    ("Dashboard", DASHBOARD_PATH),
    ("Analytics", "/analytics"),
    ("Manage Users", "/users"),
];

pub fn navbar(session: &Session, current_path: &str) -> Navbar {
    let links = match session.role {
        Role::Citizen => CITIZEN_LINKS,
        Role::Authority => AUTHORITY_LINKS,
    };

    Navbar {
        brand: "EcoWaste".to_string(),
        links: links
            .iter()
            .map(|(label, path)| NavLink {
                label: label.to_string(),
                path: path.to_string(),
                active: *path == current_path,
            })
            .collect(),
        user_name: session.name.clone(),
        role: session.role,
        points: match session.role {
            Role::Citizen => session.points,
            Role::Authority => None,
        },
    }
}
