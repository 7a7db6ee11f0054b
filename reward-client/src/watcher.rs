//! Spin watcher
//!
//! What the public wheel sees: the reward list is polled and each
//! session's [`SpinState`] compared with the previous poll. Transitions
//! are published as [`SpinEvent`]s on a broadcast channel.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use shared::models::{Participant, Reward, SpinState, Winner};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::api::AdminApi;
use crate::error::ClientResult;
use crate::http::{HttpClient, NetworkHttpClient};

const EVENT_CAPACITY: usize = 64;

/// Shortest poll period; shorter requests are raised to this
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Spin lifecycle transition
#[derive(Debug, Clone, PartialEq)]
pub enum SpinEvent {
    /// A spin was requested; the wheel should start turning
    Started {
        reward_id: String,
        title: String,
        audience: Vec<Participant>,
        triggered_at: DateTime<Utc>,
    },
    /// The service picked a winner
    Completed {
        reward_id: String,
        title: String,
        winner: Winner,
    },
    /// The session went back to a fresh active state
    Reset { reward_id: String },
    /// The session no longer exists
    Removed { reward_id: String },
}

impl SpinEvent {
    pub fn reward_id(&self) -> &str {
        match self {
            Self::Started { reward_id, .. }
            | Self::Completed { reward_id, .. }
            | Self::Reset { reward_id }
            | Self::Removed { reward_id } => reward_id,
        }
    }
}

type Snapshot = HashMap<String, SpinState>;

/// Polls the reward list and publishes spin transitions
pub struct SpinWatcher<H: HttpClient = NetworkHttpClient> {
    api: AdminApi<H>,
    interval: Duration,
    sender: broadcast::Sender<SpinEvent>,
    /// `None` until the first poll, which only sets the baseline
    previous: Mutex<Option<Snapshot>>,
}

impl<H: HttpClient> SpinWatcher<H> {
    pub fn new(api: AdminApi<H>, interval: Duration) -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            api,
            interval: interval.max(MIN_POLL_INTERVAL),
            sender,
            previous: Mutex::new(None),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SpinEvent> {
        self.sender.subscribe()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Fetch once, publish and return the transitions since the last poll
    pub async fn poll_once(&self) -> ClientResult<Vec<SpinEvent>> {
        let rewards = self.api.list_rewards().await?;
        let current: Snapshot = rewards
            .iter()
            .map(|r| (r.id.clone(), r.spin.clone()))
            .collect();

        let events = {
            let mut previous = self.previous.lock();
            let events = match previous.as_ref() {
                Some(prev) => diff(prev, &rewards),
                None => Vec::new(),
            };
            *previous = Some(current);
            events
        };

        for event in &events {
            tracing::debug!(reward_id = %event.reward_id(), ?event, "Spin event");
            // No subscribers is fine
            let _ = self.sender.send(event.clone());
        }
        Ok(events)
    }

    /// Poll until `cancel` fires
    ///
    /// A failed poll is logged and retried on the next tick; the baseline
    /// from the last good poll is kept.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        tracing::info!(interval_ms = self.interval.as_millis() as u64, "Spin watcher started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    if let Err(e) = self.poll_once().await {
                        tracing::warn!(error = %e, "Spin poll failed");
                    }
                }
            }
        }

        tracing::info!("Spin watcher stopped");
    }
}

/// Transitions from `previous` to the sessions in `current`
///
/// Events follow the order of `current`; removals come last.
pub fn diff(previous: &Snapshot, current: &[Reward]) -> Vec<SpinEvent> {
    let mut events = Vec::new();

    for reward in current {
        let started = || SpinEvent::Started {
            reward_id: reward.id.clone(),
            title: reward.title.clone(),
            audience: reward.audience.clone(),
            triggered_at: reward.spin.triggered_at().unwrap_or(reward.created_at),
        };
        let completed = |winner: &Winner| SpinEvent::Completed {
            reward_id: reward.id.clone(),
            title: reward.title.clone(),
            winner: winner.clone(),
        };
        let reset = || SpinEvent::Reset {
            reward_id: reward.id.clone(),
        };

        match (previous.get(&reward.id), &reward.spin) {
            (None, SpinState::Ready) => {}
            (None, SpinState::Spinning { .. }) => events.push(started()),
            (None, SpinState::Completed { winner, .. }) => events.push(completed(winner)),

            (Some(SpinState::Ready), SpinState::Ready) => {}
            (Some(SpinState::Ready), SpinState::Spinning { .. }) => events.push(started()),
            (Some(SpinState::Ready), SpinState::Completed { winner, .. }) => {
                events.push(completed(winner))
            }

            (Some(SpinState::Spinning { triggered_at: before }), SpinState::Spinning { triggered_at }) => {
                // Reset and triggered again between two polls
                if before != triggered_at {
                    events.push(reset());
                    events.push(started());
                }
            }
            (Some(SpinState::Spinning { .. }), SpinState::Completed { winner, .. }) => {
                events.push(completed(winner))
            }
            (Some(SpinState::Spinning { .. }), SpinState::Ready) => events.push(reset()),

            (Some(before @ SpinState::Completed { .. }), now @ SpinState::Completed { winner, .. }) => {
                if before != now {
                    events.push(reset());
                    events.push(completed(winner));
                }
            }
            (Some(SpinState::Completed { .. }), SpinState::Ready) => events.push(reset()),
            (Some(SpinState::Completed { .. }), SpinState::Spinning { .. }) => {
                events.push(reset());
                events.push(started());
            }
        }
    }

    let mut removed: Vec<&String> = previous
        .keys()
        .filter(|id| !current.iter().any(|r| &&r.id == id))
        .collect();
    removed.sort();
    events.extend(removed.into_iter().map(|id| SpinEvent::Removed {
        reward_id: id.clone(),
    }));

    events
}
