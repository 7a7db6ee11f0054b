//! Error codes for the reward service
//!
//! Codes are grouped by range, see [`super::ErrorCategory`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as its `u16` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// Caller is not authenticated
    NotAuthenticated = 1001,

    // ==================== 2xxx: Rewards ====================
    /// Reward category not found
    CategoryNotFound = 2001,
    /// Reward category name already used
    CategoryNameExists = 2002,
    /// Reward session not found
    RewardNotFound = 2101,
    /// Spin was already triggered for this session
    SpinAlreadyTriggered = 2102,
    /// Session has no spin to reset
    SpinNotTriggered = 2103,
    /// Rigged index does not point at a participant
    RigIndexOutOfRange = 2104,
    /// Participant missing name or mobile
    AudienceIncomplete = 2105,
    /// Session is completed and can no longer be changed
    RewardCompleted = 2106,

    // ==================== 3xxx: Content ====================
    /// Content item not found
    ContentNotFound = 3001,

    // ==================== 4xxx: Media ====================
    /// Media upload was rejected
    UploadFailed = 4002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
}

impl ErrorCode {
    /// Numeric value of this code
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Default message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::RequiredField => "Required field missing",
            Self::NotAuthenticated => "Not authenticated",
            Self::CategoryNotFound => "Category not found",
            Self::CategoryNameExists => "Category name already exists",
            Self::RewardNotFound => "Reward not found",
            Self::SpinAlreadyTriggered => "Spin already triggered",
            Self::SpinNotTriggered => "Spin has not been triggered",
            Self::RigIndexOutOfRange => "Rigged index is out of range",
            Self::AudienceIncomplete => "Every participant needs a name and mobile",
            Self::RewardCompleted => "Reward is already completed",
            Self::ContentNotFound => "Content not found",
            Self::UploadFailed => "Upload failed",
            Self::InternalError => "Internal server error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown `u16` to [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            7 => Self::RequiredField,
            1001 => Self::NotAuthenticated,
            2001 => Self::CategoryNotFound,
            2002 => Self::CategoryNameExists,
            2101 => Self::RewardNotFound,
            2102 => Self::SpinAlreadyTriggered,
            2103 => Self::SpinNotTriggered,
            2104 => Self::RigIndexOutOfRange,
            2105 => Self::AudienceIncomplete,
            2106 => Self::RewardCompleted,
            3001 => Self::ContentNotFound,
            4002 => Self::UploadFailed,
            9001 => Self::InternalError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}
