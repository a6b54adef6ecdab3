use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{
    models::{Role, Session},
    navigation::DASHBOARD_PATH,
    views::citizen::BinStatus,
};

// --- Login / registration page ---

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuthView {
    pub title: String,
    pub tagline: String,
    pub roles: Vec<Role>,
    pub demo_accounts: Vec<String>,
    pub login_action: String,
    pub register_action: String,
}

pub fn auth_view() -> AuthView {
    AuthView {
        title: "EcoWaste System".to_string(),
        tagline: "Smart Waste Management for a cleaner future".to_string(),
        roles: Role::ALL.to_vec(),
        demo_accounts: crate::auth::DEMO_ACCOUNTS
            .iter()
            .map(|account| account.email.to_string())
            .collect(),
        login_action: "/api/auth/login".to_string(),
        register_action: "/api/auth/register".to_string(),
    }
}

// --- Map ---

/// BinFilter
///
/// Status filter of the map page (`?status=`). Unknown values show everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum BinFilter {
    #[default]
    All,
    Empty,
    Half,
    Full,
}

impl BinFilter {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("empty") => BinFilter::Empty,
            Some("half") => BinFilter::Half,
            Some("full") => BinFilter::Full,
            _ => BinFilter::All,
        }
    }

    pub fn matches(&self, status: BinStatus) -> bool {
        match self {
            BinFilter::All => true,
            BinFilter::Empty => status == BinStatus::Empty,
            BinFilter::Half => status == BinStatus::Half,
            BinFilter::Full => status == BinStatus::Full,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MapMarker {
    pub id: u32,
    pub name: String,
    pub position: GeoPoint,
    pub status: BinStatus,
    pub fill_level: u8,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
    pub filter: BinFilter,
    pub markers: Vec<MapMarker>,
}

const CITY_CENTER: GeoPoint = GeoPoint {
    latitude: 28.6139,
    longitude: 77.2090,
};

const MAP_BINS: &[(u32, &str, f64, f64, BinStatus, u8)] = &[
    (1, "Main Street Bin", 28.6139, 77.2090, BinStatus::Empty, 18),
    (2, "Park Avenue Bin", 28.6165, 77.2140, BinStatus::Half, 62),
    (3, "City Center Bin", 28.6200, 77.2050, BinStatus::Full, 92),
];

fn status_color(status: BinStatus) -> &'static str {
    match status {
        BinStatus::Empty => "green",
        BinStatus::Half => "orange",
        BinStatus::Full => "red",
    }
}

pub fn map(filter: BinFilter) -> MapView {
    MapView {
        center: CITY_CENTER,
        zoom: 13,
        tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
        attribution: "© OpenStreetMap contributors".to_string(),
        filter,
        markers: MAP_BINS
            .iter()
            .filter(|(.., status, _)| filter.matches(*status))
            .map(|(id, name, latitude, longitude, status, fill_level)| MapMarker {
                id: *id,
                name: name.to_string(),
                position: GeoPoint {
                    latitude: *latitude,
                    longitude: *longitude,
                },
                status: *status,
                fill_level: *fill_level,
                color: status_color(*status).to_string(),
            })
            .collect(),
    }
}

// --- Not found ---

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Suggestion {
    pub label: String,
    pub path: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NotFoundView {
    pub path: String,
    pub message: String,
    pub suggestions: Vec<Suggestion>,
}

/// Dead-end page for unmatched paths, offering pages the visitor's role can reach.
pub fn not_found(path: &str, session: Option<&Session>) -> NotFoundView {
    let mut suggestions = vec![("Dashboard", DASHBOARD_PATH, "Return to your main dashboard")];
    match session.map(|s| s.role) {
        Some(Role::Citizen) => suggestions.extend([
            ("Submit Report", "/report", "Report an issue to authorities"),
            ("Nearby Bins", "/bins", "Find the closest bins"),
        ]),
        Some(Role::Authority) => suggestions.extend([
            ("Manage Users", "/users", "View and manage citizen accounts"),
            ("Analytics", "/analytics", "View platform statistics"),
        ]),
        None => {}
    }

    NotFoundView {
        path: path.to_string(),
        message: format!("The page \"{path}\" doesn't exist or has been moved."),
        suggestions: suggestions
            .into_iter()
            .map(|(label, path, description)| Suggestion {
                label: label.to_string(),
                path: path.to_string(),
                description: description.to_string(),
            })
            .collect(),
    }
}
