use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{
    error::AppError,
    models::{Notice, Role},
    views::citizen::{BinStatus, QuickAction},
};

// --- Dashboard ---

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BinStats {
    pub total: u32,
    pub empty: u32,
    pub half: u32,
    pub full: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CriticalBin {
    pub id: u32,
    pub location: String,
    pub fill_level: u8,
    pub status: BinStatus,
    pub last_collection: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SuggestedRoute {
    pub id: u32,
    pub route: String,
    pub bins: u32,
    pub efficiency_pct: u8,
    pub estimated_hours: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EngagementStats {
    pub active_users: u32,
    pub reports_today: u32,
    pub points_awarded: u32,
    pub recycling_rate_pct: u8,
}

/// AuthorityDashboardView
///
/// Operations overview: fleet-wide bin fill, bins that need collection first,
/// suggested collection routes and citizen engagement.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuthorityDashboardView {
    pub bin_stats: BinStats,
    pub critical_bins: Vec<CriticalBin>,
    pub suggested_routes: Vec<SuggestedRoute>,
    pub engagement: EngagementStats,
    pub quick_actions: Vec<QuickAction>,
}

pub fn dashboard() -> AuthorityDashboardView {
    AuthorityDashboardView {
        bin_stats: BinStats {
            total: 150,
            empty: 60,
            half: 70,
            full: 20,
        },
        critical_bins: [
            (1, "City Center Plaza", 95, BinStatus::Full, "2 days ago"),
            (2, "Shopping Mall", 89, BinStatus::Full, "1 day ago"),
            (3, "Park Entrance", 87, BinStatus::Half, "3 hours ago"),
        ]
        .into_iter()
        .map(|(id, location, fill_level, status, last_collection)| CriticalBin {
            id,
            location: location.to_string(),
            fill_level,
            status,
            last_collection: last_collection.to_string(),
        })
        .collect(),
        suggested_routes: [
            (1, "Route A", 12, 85, 2.5),
            (2, "Route B", 8, 92, 1.8),
            (3, "Route C", 15, 78, 3.2),
        ]
        .into_iter()
        .map(|(id, route, bins, efficiency_pct, estimated_hours)| SuggestedRoute {
            id,
            route: route.to_string(),
            bins,
            efficiency_pct,
            estimated_hours,
        })
        .collect(),
        engagement: EngagementStats {
            active_users: 1250,
            reports_today: 23,
            points_awarded: 15600,
            recycling_rate_pct: 78,
        },
        quick_actions: vec![
            QuickAction {
                label: "Manage Users".to_string(),
                path: "/users".to_string(),
            },
            QuickAction {
                label: "View Analytics".to_string(),
                path: "/analytics".to_string(),
            },
            QuickAction {
                label: "View on Map".to_string(),
                path: "/map".to_string(),
            },
        ],
    }
}

// --- Analytics ---

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WasteAmount {
    pub waste_type: String,
    pub amount_kg: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CollectionTrend {
    pub month: String,
    pub collected_kg: u32,
    pub recycled_kg: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RouteEfficiency {
    pub route: String,
    pub distance_km: u32,
    pub time_hours: f32,
    pub stops: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CollectionTotals {
    pub collected_kg: u32,
    pub recycled_kg: u32,
    pub recycling_rate_pct: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnalyticsView {
    pub waste_by_type: Vec<WasteAmount>,
    pub collection_trends: Vec<CollectionTrend>,
    pub route_efficiency: Vec<RouteEfficiency>,
    pub totals: CollectionTotals,
}

pub fn analytics() -> AnalyticsView {
    let collection_trends: Vec<CollectionTrend> = [
        ("Jan", 820, 610),
        ("Feb", 760, 590),
        ("Mar", 910, 700),
        ("Apr", 980, 740),
        ("May", 1040, 780),
        ("Jun", 990, 760),
    ]
    .into_iter()
    .map(|(month, collected_kg, recycled_kg)| CollectionTrend {
        month: month.to_string(),
        collected_kg,
        recycled_kg,
    })
    .collect();

    let totals = totals(&collection_trends);

    AnalyticsView {
        waste_by_type: [
            ("Organic", 540),
            ("Plastic", 320),
            ("Paper", 260),
            ("Metal", 120),
            ("Glass", 180),
        ]
        .into_iter()
        .map(|(waste_type, amount_kg)| WasteAmount {
            waste_type: waste_type.to_string(),
            amount_kg,
        })
        .collect(),
        collection_trends,
        route_efficiency: [
            ("A", 34, 2.4, 12),
            ("B", 28, 1.9, 9),
            ("C", 42, 3.1, 15),
            ("D", 31, 2.2, 11),
        ]
        .into_iter()
        .map(|(route, distance_km, time_hours, stops)| RouteEfficiency {
            route: route.to_string(),
            distance_km,
            time_hours,
            stops,
        })
        .collect(),
        totals,
    }
}

fn totals(trends: &[CollectionTrend]) -> CollectionTotals {
    let collected_kg: u32 = trends.iter().map(|t| t.collected_kg).sum();
    let recycled_kg: u32 = trends.iter().map(|t| t.recycled_kg).sum();
    let recycling_rate_pct = if collected_kg == 0 {
        0.0
    } else {
        // One decimal place.
        (recycled_kg as f32 * 1000.0 / collected_kg as f32).round() / 10.0
    };

    CollectionTotals {
        collected_kg,
        recycled_kg,
        recycling_rate_pct,
    }
}

// --- User management ---

/// DirectoryUser
///
/// Row of the user-management table.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DirectoryUser {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub points: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UsersView {
    pub users: Vec<DirectoryUser>,
}

const DIRECTORY: &[(u32, &str, &str, Role, u32)] = &[
    (1, "Ava Patel", "ava@example.com", Role::Citizen, 240),
    (2, "Rohan Mehta", "rohan@example.com", Role::Citizen, 120),
    (3, "Admin Rao", "admin@example.com", Role::Authority, 0),
];

pub fn users() -> UsersView {
    UsersView {
        users: DIRECTORY
            .iter()
            .map(|(id, name, email, role, points)| DirectoryUser {
                id: *id,
                name: name.to_string(),
                email: email.to_string(),
                role: *role,
                points: *points,
            })
            .collect(),
    }
}

pub fn find_user(id: u32) -> Option<DirectoryUser> {
    users().users.into_iter().find(|user| user.id == id)
}

/// Acknowledges a promotion. The directory is fixture data and stays unchanged.
pub fn promote(id: u32) -> Result<Notice, AppError> {
    let user = find_user(id).ok_or_else(|| AppError::not_found("user"))?;
    Ok(Notice::info(
        "Role updated",
        format!("{} promoted to authority", user.name),
    ))
}

/// Acknowledges a removal. The directory is fixture data and stays unchanged.
pub fn remove(id: u32) -> Result<Notice, AppError> {
    let user = find_user(id).ok_or_else(|| AppError::not_found("user"))?;
    Ok(Notice::info(
        "User removed",
        format!("{} has been removed", user.name),
    ))
}
