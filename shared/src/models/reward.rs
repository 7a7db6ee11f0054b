//! Reward Session Model
//!
//! The service describes a session's spin lifecycle with three loosely
//! coupled fields (`status`, `spinTriggeredAt`, `winner`) and encodes "no
//! rig" as `riggedIndex = -1`. [`RewardRecord`] is that wire shape.
//! [`Reward`] is the validated form: the lifecycle is a single
//! [`SpinState`] and the rig choice a [`RigSelection`], so combinations
//! such as "completed without a winner" cannot be represented.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::participant::Participant;

/// Wire value of `riggedIndex` meaning "no override, pick at random"
pub const RANDOM_RIG_INDEX: i64 = -1;

fn random_rig_index() -> i64 {
    RANDOM_RIG_INDEX
}

/// Session status as reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardStatus {
    Active,
    Completed,
}

/// Winning participant together with its audience slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub name: String,
    pub mobile: String,
    pub index: usize,
}

impl Winner {
    pub fn from_participant(participant: &Participant, index: usize) -> Self {
        Self {
            name: participant.name.clone(),
            mobile: participant.mobile.clone(),
            index,
        }
    }
}

/// Reward session exactly as the service sends it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub audience: Vec<Participant>,
    pub status: RewardStatus,
    #[serde(default = "random_rig_index")]
    pub rigged_index: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Winner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spin_triggered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Admin override for the spin outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RigSelection {
    /// No override; the service picks uniformly at random
    #[default]
    Random,
    /// Force the participant at this audience slot to win
    Participant(usize),
}

impl RigSelection {
    /// Decode the wire `riggedIndex` against an audience of `audience_len`
    pub fn from_wire(index: i64, audience_len: usize) -> Result<Self, RewardDecodeError> {
        if index == RANDOM_RIG_INDEX {
            return Ok(Self::Random);
        }
        match usize::try_from(index) {
            Ok(slot) if slot < audience_len => Ok(Self::Participant(slot)),
            _ => Err(RewardDecodeError::RigIndexOutOfRange {
                index,
                audience: audience_len,
            }),
        }
    }

    /// Wire value sent as `riggedIndex`
    pub fn to_wire(self) -> i64 {
        match self {
            Self::Random => RANDOM_RIG_INDEX,
            Self::Participant(slot) => slot as i64,
        }
    }

    /// Check the selection points at an existing participant
    pub fn validate(self, audience_len: usize) -> Result<Self, RewardDecodeError> {
        Self::from_wire(self.to_wire(), audience_len)
    }
}

/// Spin lifecycle of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinState {
    /// Active, waiting for the admin to run the wheel
    Ready,
    /// Active, spin requested; the public wheel is animating
    Spinning { triggered_at: DateTime<Utc> },
    /// The service resolved the spin
    Completed {
        winner: Winner,
        triggered_at: Option<DateTime<Utc>>,
    },
}

impl SpinState {
    pub fn status(&self) -> RewardStatus {
        match self {
            Self::Ready | Self::Spinning { .. } => RewardStatus::Active,
            Self::Completed { .. } => RewardStatus::Completed,
        }
    }

    pub fn triggered_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Ready => None,
            Self::Spinning { triggered_at } => Some(*triggered_at),
            Self::Completed { triggered_at, .. } => *triggered_at,
        }
    }

    pub fn winner(&self) -> Option<&Winner> {
        match self {
            Self::Completed { winner, .. } => Some(winner),
            _ => None,
        }
    }
}

/// Why a [`RewardRecord`] could not be turned into a [`Reward`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewardDecodeError {
    #[error("rigged index {index} is out of range for {audience} participants")]
    RigIndexOutOfRange { index: i64, audience: usize },

    #[error("completed session has no winner")]
    CompletedWithoutWinner,

    #[error("winner index {index} is out of range for {audience} participants")]
    WinnerOutOfRange { index: usize, audience: usize },

    #[error("active session already has a winner")]
    WinnerWhileActive,
}

/// Validated reward session
#[derive(Debug, Clone, PartialEq)]
pub struct Reward {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub banner_url: Option<String>,
    pub button_text: Option<String>,
    pub button_link: Option<String>,
    pub category_id: Option<String>,
    pub audience: Vec<Participant>,
    pub rig: RigSelection,
    pub spin: SpinState,
    pub created_at: DateTime<Utc>,
}

impl Reward {
    pub fn status(&self) -> RewardStatus {
        self.spin.status()
    }

    pub fn is_active(&self) -> bool {
        self.status() == RewardStatus::Active
    }

    /// RUN is offered only before any spin was requested
    pub fn can_trigger_spin(&self) -> bool {
        matches!(self.spin, SpinState::Ready)
    }

    /// RESET is offered once a spin was requested or resolved
    pub fn can_reset_spin(&self) -> bool {
        !self.can_trigger_spin()
    }

    /// The rig selector is only meaningful while the outcome is open
    pub fn shows_rig_selector(&self) -> bool {
        self.is_active()
    }
}

impl TryFrom<RewardRecord> for Reward {
    type Error = RewardDecodeError;

    fn try_from(record: RewardRecord) -> Result<Self, Self::Error> {
        let audience_len = record.audience.len();
        let rig = RigSelection::from_wire(record.rigged_index, audience_len)?;

        let spin = match (record.status, record.winner, record.spin_triggered_at) {
            (RewardStatus::Active, Some(_), _) => return Err(RewardDecodeError::WinnerWhileActive),
            (RewardStatus::Active, None, None) => SpinState::Ready,
            (RewardStatus::Active, None, Some(triggered_at)) => SpinState::Spinning { triggered_at },
            (RewardStatus::Completed, None, _) => {
                return Err(RewardDecodeError::CompletedWithoutWinner);
            }
            (RewardStatus::Completed, Some(winner), triggered_at) => {
                if winner.index >= audience_len {
                    return Err(RewardDecodeError::WinnerOutOfRange {
                        index: winner.index,
                        audience: audience_len,
                    });
                }
                SpinState::Completed {
                    winner,
                    triggered_at,
                }
            }
        };

        Ok(Self {
            id: record.id,
            title: record.title,
            description: non_empty(record.description),
            banner_url: non_empty(record.banner_url),
            button_text: non_empty(record.button_text),
            button_link: non_empty(record.button_link),
            category_id: non_empty(record.category_id),
            audience: record.audience,
            rig,
            spin,
            created_at: record.created_at,
        })
    }
}

/// The form posts empty strings for untouched optional fields
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Create reward payload (`POST /api/rewards`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardCreate {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub banner_url: String,
    #[serde(default)]
    pub button_text: String,
    #[serde(default)]
    pub button_link: String,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub audience: Vec<Participant>,
}

/// Set rig payload (`PUT /api/rewards/{id}/rig`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RigUpdate {
    pub rigged_index: i64,
}

impl From<RigSelection> for RigUpdate {
    fn from(selection: RigSelection) -> Self {
        Self {
            rigged_index: selection.to_wire(),
        }
    }
}
