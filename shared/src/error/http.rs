//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::CategoryNotFound
            | Self::RewardNotFound
            | Self::ContentNotFound => StatusCode::NOT_FOUND,

            Self::CategoryNameExists
            | Self::SpinAlreadyTriggered
            | Self::SpinNotTriggered
            | Self::RewardCompleted => StatusCode::CONFLICT,

            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,

            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,

            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::RewardNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::CategoryNotFound.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_status() {
        assert_eq!(ErrorCode::SpinAlreadyTriggered.http_status(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::CategoryNameExists.http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_validation_defaults_to_bad_request() {
        assert_eq!(ErrorCode::ValidationFailed.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::RigIndexOutOfRange.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::AudienceIncomplete.http_status(), StatusCode::BAD_REQUEST);
    }
}
