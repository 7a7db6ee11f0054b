//! Input validation helpers
//!
//! Text length limits and checks shared by the admin client (before a
//! request is sent) and the service (on receipt).

use crate::error::{AppError, ErrorCode};
use crate::models::Participant;

// ── Text length limits ──────────────────────────────────────────────

/// Category names, participant names
pub const MAX_NAME_LEN: usize = 200;

/// Reward and content titles
pub const MAX_TITLE_LEN: usize = 300;

/// Descriptions and content bodies
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/// Mobile numbers, button captions
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} is required"),
        )
        .with_detail("field", field));
    }
    validate_length(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) => validate_length(v, field, max_len),
        None => Ok(()),
    }
}

fn validate_length(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Every participant must carry both a name and a mobile number.
pub fn validate_audience(audience: &[Participant]) -> Result<(), AppError> {
    if let Some(slot) = audience.iter().position(|p| !p.is_complete()) {
        return Err(AppError::with_message(
            ErrorCode::AudienceIncomplete,
            format!("Participant {} needs a name and mobile", slot + 1),
        )
        .with_detail("index", slot));
    }
    for p in audience {
        validate_length(&p.name, "participant name", MAX_NAME_LEN)?;
        validate_length(&p.mobile, "participant mobile", MAX_SHORT_TEXT_LEN)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_rejects_blank() {
        let err = validate_required_text("   ", "title", MAX_TITLE_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "title is required");
    }

    #[test]
    fn test_length_limit() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        let err = validate_required_text(&long, "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(validate_optional_text(None, "link", MAX_URL_LEN).is_ok());
    }

    #[test]
    fn test_audience_reports_first_incomplete_slot() {
        let audience = vec![
            Participant::new("Asha", "111"),
            Participant::new("Ravi", ""),
            Participant::default(),
        ];
        let err = validate_audience(&audience).unwrap_err();
        assert_eq!(err.code, ErrorCode::AudienceIncomplete);
        assert_eq!(err.message, "Participant 2 needs a name and mobile");
    }
}
