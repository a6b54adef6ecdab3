use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{
    error::AppError,
    models::{Notice, Session},
};

// --- Shared pieces ---

/// Fill state of a bin, as shown by its badge colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum BinStatus {
    Empty,
    Half,
    Full,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NearbyBin {
    pub id: u32,
    pub location: String,
    pub distance_km: f32,
    pub fill_level: u8,
    pub status: BinStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuickAction {
    pub label: String,
    pub path: String,
}

fn bin(id: u32, location: &str, distance_km: f32, fill_level: u8, status: BinStatus) -> NearbyBin {
    NearbyBin {
        id,
        location: location.to_string(),
        distance_km,
        fill_level,
        status,
    }
}

// --- Dashboard ---

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WasteTip {
    pub title: String,
    pub tip: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Activity {
    pub date: String,
    pub action: String,
    pub points: u32,
}

/// CitizenDashboardView
///
/// Landing page for citizens: points balance, shortcuts, bins close by and recent
/// point-earning activity.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CitizenDashboardView {
    pub greeting: String,
    pub points: u32,
    pub quick_actions: Vec<QuickAction>,
    pub nearby_bins: Vec<NearbyBin>,
    pub waste_tips: Vec<WasteTip>,
    pub recent_activity: Vec<Activity>,
}

pub fn dashboard(session: Option<&Session>) -> CitizenDashboardView {
    let name = session.map(|s| s.name.as_str()).unwrap_or("there");

    CitizenDashboardView {
        greeting: format!("Welcome back, {name}!"),
        points: session.and_then(|s| s.points).unwrap_or(0),
        quick_actions: vec![
            QuickAction {
                label: "Find Bins".to_string(),
                path: "/bins".to_string(),
            },
            QuickAction {
                label: "Report Issue".to_string(),
                path: "/report".to_string(),
            },
            QuickAction {
                label: "View Rewards".to_string(),
                path: "/rewards".to_string(),
            },
        ],
        nearby_bins: vec![
            bin(1, "Main Street", 0.2, 20, BinStatus::Empty),
            bin(2, "Park Avenue", 0.5, 65, BinStatus::Half),
            bin(3, "City Center", 0.8, 95, BinStatus::Full),
        ],
        waste_tips: [
            ("Organic Waste", "Food scraps go in green bin", "🥬"),
            ("Recyclables", "Clean containers only", "♻️"),
            ("Hazardous", "Special disposal required", "⚠️"),
        ]
        .into_iter()
        .map(|(title, tip, icon)| WasteTip {
            title: title.to_string(),
            tip: tip.to_string(),
            icon: icon.to_string(),
        })
        .collect(),
        recent_activity: [
            ("2024-01-15", "Recycling reported", 10),
            ("2024-01-14", "Bin status updated", 5),
            ("2024-01-13", "Issue reported", 15),
        ]
        .into_iter()
        .map(|(date, action, points)| Activity {
            date: date.to_string(),
            action: action.to_string(),
            points,
        })
        .collect(),
    }
}

// --- Bins ---

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BinsView {
    pub bins: Vec<NearbyBin>,
}

pub fn bins() -> BinsView {
    BinsView {
        bins: vec![
            bin(1, "Main Street", 0.2, 18, BinStatus::Empty),
            bin(2, "Park Avenue - Gate 2", 0.5, 62, BinStatus::Half),
            bin(3, "City Center", 0.8, 92, BinStatus::Full),
            bin(4, "Library Corner", 1.2, 34, BinStatus::Half),
        ],
    }
}

// --- Report form ---

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportFormView {
    pub title: String,
    pub description: String,
    pub submit_to: String,
    pub fields: Vec<FormField>,
}

pub fn report_form() -> ReportFormView {
    use crate::forms::report_rules;

    let field = |name: &str, label: &str, placeholder: &str| FormField {
        name: name.to_string(),
        label: label.to_string(),
        placeholder: placeholder.to_string(),
        required: report_rules::min_length(name).is_some(),
        min_length: report_rules::min_length(name),
    };

    ReportFormView {
        title: "Report an Issue".to_string(),
        description: "Provide information so authorities can respond quickly".to_string(),
        submit_to: "/api/reports".to_string(),
        fields: vec![
            field("title", "Title", "e.g., Overflowing bin near park"),
            field("location", "Location", "e.g., Park Avenue, Gate 2"),
            field("description", "Description", "Describe what happened..."),
            field("image", "Photo (optional)", "image/*"),
        ],
    }
}

// --- Rewards ---

/// Reward
///
/// Catalogue entry that can be exchanged for points.
#[derive(Debug, Clone, Copy)]
pub struct Reward {
    pub id: u32,
    pub title: &'static str,
    pub points: u32,
    pub description: &'static str,
}

pub const REWARD_CATALOGUE: &[Reward] = &[
    Reward {
        id: 1,
        title: "10% Off Municipal Fee",
        points: 200,
        description: "Discount on next month fee",
    },
    Reward {
        id: 2,
        title: "Local Store Voucher",
        points: 350,
        description: "₹200 voucher for partner stores",
    },
    Reward {
        id: 3,
        title: "Eco Tote Bag",
        points: 150,
        description: "Reusable tote for sustainable living",
    },
];

pub fn find_reward(id: u32) -> Option<&'static Reward> {
    REWARD_CATALOGUE.iter().find(|reward| reward.id == id)
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RewardOffer {
    pub id: u32,
    pub title: String,
    pub points: u32,
    pub description: String,
    pub affordable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PointsEntry {
    pub id: u32,
    pub date: String,
    pub item: String,
    pub points: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RewardsView {
    pub points: u32,
    pub rewards: Vec<RewardOffer>,
    pub history: Vec<PointsEntry>,
}

pub fn rewards(session: Option<&Session>) -> RewardsView {
    let points = session.and_then(|s| s.points).unwrap_or(0);

    RewardsView {
        points,
        rewards: REWARD_CATALOGUE
            .iter()
            .map(|reward| RewardOffer {
                id: reward.id,
                title: reward.title.to_string(),
                points: reward.points,
                description: reward.description.to_string(),
                affordable: points >= reward.points,
            })
            .collect(),
        history: [
            (101, "2024-01-14", "Weekly recycling", 10),
            (102, "2024-01-12", "Reported litter spot", 15),
            (103, "2024-01-10", "Neighborhood cleanup", 30),
        ]
        .into_iter()
        .map(|(id, date, item, points)| PointsEntry {
            id,
            date: date.to_string(),
            item: item.to_string(),
            points,
        })
        .collect(),
    }
}

/// redeem
///
/// Checks the session's balance against the reward's cost. The balance is left as is:
/// the session belongs to the auth operations alone.
pub fn redeem(session: &Session, reward_id: u32) -> Result<Notice, AppError> {
    let reward = find_reward(reward_id).ok_or_else(|| AppError::not_found("reward"))?;

    if session.points.unwrap_or(0) < reward.points {
        return Err(AppError::Conflict {
            notice: Notice::failure(
                "Not enough points",
                format!("You need {} points to redeem.", reward.points),
            ),
        });
    }

    Ok(Notice::info(
        "Redeemed!",
        format!("{} redeemed successfully.", reward.title),
    ))
}
