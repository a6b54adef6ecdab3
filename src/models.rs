use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Identity ---

/// Role
///
/// The two audiences of the portal. Every role-specific route variant and every
/// role-gated action is keyed by this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    Citizen,
    Authority,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Citizen, Role::Authority];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Citizen => "citizen",
            Role::Authority => "authority",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session
///
/// The currently authenticated identity. Created by login/register, cleared by
/// logout, persisted verbatim into local storage so a restart restores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Session {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    // Citizens accumulate points; authorities usually carry none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

// --- Notices ---

/// NoticeVariant
///
/// Visual weight of a notice. `Destructive` marks failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum NoticeVariant {
    #[default]
    Default,
    Destructive,
}

/// Notice
///
/// Transient user message (what a toast would display). The display surface itself
/// is outside this crate; only the payload is produced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn info(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    pub fn failure(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }
}

// --- Request Payloads (Input Schemas) ---

/// LoginRequest
///
/// Payload of the login form (POST /api/auth/login). The role toggle is part of the
/// credentials: a citizen account cannot sign in as an authority.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginRequest {
    #[schema(example = "citizen@demo.com")]
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// RegisterRequest
///
/// Payload of the registration form (POST /api/auth/register).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// ReportRequest
///
/// Payload of the report-issue form (POST /api/reports). `image` is the name of an
/// optional attached photo; the upload itself never leaves the display.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ReportRequest {
    #[schema(example = "Overflowing bin near park")]
    pub title: String,
    #[schema(example = "Park Avenue, Gate 2")]
    pub location: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// InviteRequest
///
/// Payload of the authority "invite user" dialog (POST /api/users/invite).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct InviteRequest {
    pub email: String,
}

// --- Action Responses (Output Schemas) ---

/// AuthResponse
///
/// Result of a successful login or registration: the new session, a welcome notice
/// and where the display should navigate next.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct AuthResponse {
    pub session: Session,
    pub notice: Notice,
    pub redirect: String,
}

/// ActionResponse
///
/// Generic acknowledgement for actions that only produce a notice and, optionally,
/// a navigation target.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ActionResponse {
    pub notice: Notice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

/// SubmittedReport
///
/// An accepted issue report. Reports are acknowledged but not stored anywhere.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct SubmittedReport {
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub title: String,
    pub location: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[ts(type = "string")]
    pub submitted_at: DateTime<Utc>,
}

/// ReportResponse
///
/// Body of a `201 Created` report submission.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ReportResponse {
    pub report: SubmittedReport,
    pub notice: Notice,
    pub redirect: String,
}
