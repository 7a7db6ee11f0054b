//! Session dashboard view model
//!
//! Decides which controls a reward session offers. The rules follow the
//! spin state alone:
//!
//! | State      | Action | Rig selector |
//! |------------|--------|--------------|
//! | Ready      | RUN    | yes          |
//! | Spinning   | RESET  | yes          |
//! | Completed  | RESET  | no           |

use chrono::{DateTime, Utc};
use shared::models::{Reward, RewardStatus, RigSelection, Winner};

/// Label of the rig option that leaves the outcome to chance
pub const RANDOM_OUTCOME_LABEL: &str = "🎲 Random Outcome";

/// The single lifecycle button shown for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Run,
    Reset,
}

impl SessionAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Run => "RUN",
            Self::Reset => "RESET",
        }
    }
}

/// One entry of the rig dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RigOption {
    pub selection: RigSelection,
    pub label: String,
    pub selected: bool,
}

/// A session as the dashboard shows it
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardRow {
    pub id: String,
    pub title: String,
    pub status: RewardStatus,
    pub audience_size: usize,
    pub action: SessionAction,
    /// Empty once the session is completed
    pub rig_options: Vec<RigOption>,
    pub winner: Option<Winner>,
    pub triggered_at: Option<DateTime<Utc>>,
}

impl DashboardRow {
    pub fn from_reward(reward: &Reward) -> Self {
        let action = if reward.can_trigger_spin() {
            SessionAction::Run
        } else {
            SessionAction::Reset
        };

        let rig_options = if reward.shows_rig_selector() {
            rig_options(reward)
        } else {
            Vec::new()
        };

        Self {
            id: reward.id.clone(),
            title: reward.title.clone(),
            status: reward.status(),
            audience_size: reward.audience.len(),
            action,
            rig_options,
            winner: reward.spin.winner().cloned(),
            triggered_at: reward.spin.triggered_at(),
        }
    }

    /// The option currently selected, if the selector is shown
    pub fn selected_rig(&self) -> Option<&RigOption> {
        self.rig_options.iter().find(|o| o.selected)
    }

    pub fn shows_rig_selector(&self) -> bool {
        !self.rig_options.is_empty()
    }
}

fn rig_options(reward: &Reward) -> Vec<RigOption> {
    let random = RigOption {
        selection: RigSelection::Random,
        label: RANDOM_OUTCOME_LABEL.to_string(),
        selected: reward.rig == RigSelection::Random,
    };

    std::iter::once(random)
        .chain(reward.audience.iter().enumerate().map(|(slot, p)| {
            let selection = RigSelection::Participant(slot);
            RigOption {
                selection,
                label: format!("{} ({})", p.name, p.mobile),
                selected: reward.rig == selection,
            }
        }))
        .collect()
}
