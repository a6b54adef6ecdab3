//! Form validation.
//!
//! Each validator collects every failing field before returning, so the display can
//! mark all of them at once.

use crate::{
    error::{AppError, FieldErrors},
    models::{InviteRequest, LoginRequest, RegisterRequest, ReportRequest},
};

/// Length rules of the report-issue form, shared with the form descriptor the
/// report page renders.
pub mod report_rules {
    pub const TITLE_MIN: usize = 3;
    pub const LOCATION_MIN: usize = 3;
    pub const DESCRIPTION_MIN: usize = 10;

    pub fn min_length(field: &str) -> Option<usize> {
        match field {
            "title" => Some(TITLE_MIN),
            "location" => Some(LOCATION_MIN),
            "description" => Some(DESCRIPTION_MIN),
            _ => None,
        }
    }
}

fn char_len(value: &str) -> usize {
    value.trim().chars().count()
}

fn finish(fields: FieldErrors) -> Result<(), AppError> {
    if fields.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation { fields })
    }
}

fn require(fields: &mut FieldErrors, name: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        fields.insert(name.to_string(), message.to_string());
    }
}

pub fn validate_login(req: &LoginRequest) -> Result<(), AppError> {
    let mut fields = FieldErrors::new();
    require(&mut fields, "email", &req.email, "Email is required");
    require(&mut fields, "password", &req.password, "Password is required");
    finish(fields)
}

pub fn validate_register(req: &RegisterRequest) -> Result<(), AppError> {
    let mut fields = FieldErrors::new();
    require(&mut fields, "name", &req.name, "Name is required");
    require(&mut fields, "email", &req.email, "Email is required");
    require(&mut fields, "password", &req.password, "Password is required");
    finish(fields)
}

pub fn validate_report(req: &ReportRequest) -> Result<(), AppError> {
    use report_rules::*;

    let mut fields = FieldErrors::new();
    if char_len(&req.title) < TITLE_MIN {
        fields.insert("title".to_string(), "Title is required".to_string());
    }
    if char_len(&req.location) < LOCATION_MIN {
        fields.insert("location".to_string(), "Location is required".to_string());
    }
    if char_len(&req.description) < DESCRIPTION_MIN {
        fields.insert(
            "description".to_string(),
            "Please describe the issue".to_string(),
        );
    }
    finish(fields)
}

pub fn validate_invite(req: &InviteRequest) -> Result<(), AppError> {
    if !req.email.contains('@') {
        return Err(AppError::invalid_field(
            "email",
            "Please enter a valid email address.",
        ));
    }
    Ok(())
}
