//! Error types shared across the portal.
//!
//! `StorageError` and `ConfigError` stay inside the process; `AppError` is what the
//! HTTP shell hands back to the display, carrying either inline field messages
//! (validation) or a notice payload (everything a toast would show).

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::models::Notice;

/// Failures of the durable local storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("local storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("local storage contents are not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("local storage unavailable: {0}")]
    Unavailable(String),
}

/// Malformed environment configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

/// Per-field validation messages, keyed by form field name.
pub type FieldErrors = BTreeMap<String, String>;

/// AppError
///
/// Every failure an `/api` action can report. Validation and authentication
/// failures are recovered by the display; nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed form input, shown inline next to each field.
    #[error("validation failed")]
    Validation { fields: FieldErrors },

    /// Credentials were rejected.
    #[error("authentication failed")]
    Authentication { notice: Notice },

    /// The action needs a signed-in session and there is none.
    #[error("sign in required")]
    Unauthenticated,

    /// The signed-in role may not perform this action.
    #[error("forbidden: {message}")]
    Forbidden { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    /// The action is well-formed but cannot be honoured right now.
    #[error("conflict")]
    Conflict { notice: Notice },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AppError {
    pub fn forbidden(message: &str) -> Self {
        Self::Forbidden {
            message: message.to_string(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::NotFound {
            message: message.to_string(),
        }
    }

    /// Single-field validation failure.
    pub fn invalid_field(field: &str, message: &str) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.to_string(), message.to_string());
        Self::Validation { fields }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Authentication { .. } | AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// ErrorResponse
///
/// JSON body of every non-2xx `/api` response.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let AppError::Storage(ref e) = self {
            tracing::error!(error = %e, "local storage failure while handling action");
        }

        let error = self.to_string();
        let (fields, notice) = match self {
            AppError::Validation { fields } => (Some(fields), None),
            AppError::Authentication { notice } | AppError::Conflict { notice } => {
                (None, Some(notice))
            }
            _ => (None, None),
        };

        let body = ErrorResponse {
            error,
            status_code: status.as_u16(),
            fields,
            notice,
        };

        (status, Json(body)).into_response()
    }
}
