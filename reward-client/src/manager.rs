//! Reward session manager
//!
//! Creation, rig selection and the spin lifecycle. The service owns the
//! randomness and the transition to `completed`; this side only asks for a
//! spin, resets it or changes the rig, after checking the cached state
//! allows it.

use std::sync::Arc;

use shared::models::{Reward, RigSelection};

use crate::api::AdminApi;
use crate::cache::QueryCache;
use crate::dashboard::DashboardRow;
use crate::error::{ClientError, ClientResult};
use crate::form::RewardForm;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::notify::{Confirm, Notifier, reject, report};

/// Reward sessions panel
#[derive(Clone)]
pub struct RewardManager<H: HttpClient = NetworkHttpClient> {
    api: AdminApi<H>,
    notifier: Arc<dyn Notifier>,
    cache: Arc<QueryCache<Reward>>,
}

impl<H: HttpClient> RewardManager<H> {
    pub fn new(api: AdminApi<H>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            cache: Arc::new(QueryCache::new()),
        }
    }

    /// Fetch the session list from the server
    pub async fn refresh(&self) -> ClientResult<Vec<Reward>> {
        self.cache.refresh(|| self.api.list_rewards()).await
    }

    /// Cached sessions, in server order
    pub fn rewards(&self) -> Vec<Reward> {
        self.cache.snapshot()
    }

    pub fn cache(&self) -> &QueryCache<Reward> {
        &self.cache
    }

    /// Dashboard rows for the cached sessions
    pub fn dashboard(&self) -> Vec<DashboardRow> {
        self.cache
            .snapshot()
            .iter()
            .map(DashboardRow::from_reward)
            .collect()
    }

    /// Submit the creation form
    ///
    /// On success the form goes back to its initial state and the list is
    /// refetched. On failure the form keeps everything that was typed.
    pub async fn create_reward(&self, form: &mut RewardForm) -> ClientResult<()> {
        let payload = form
            .to_payload()
            .map_err(|e| reject(self.notifier.as_ref(), e))?;

        report(
            self.notifier.as_ref(),
            "Reward created",
            self.api.create_reward(&payload),
        )
        .await?;

        tracing::info!(
            title = %payload.title,
            audience = payload.audience.len(),
            "Reward created"
        );
        form.reset();
        self.refetch().await;
        Ok(())
    }

    /// Change the rig choice of an active session
    pub async fn update_rigged_index(&self, id: &str, selection: RigSelection) -> ClientResult<()> {
        let reward = self.cached(id).await?;
        if !reward.shows_rig_selector() {
            return Err(self.refuse(ClientError::InvalidState(
                "The outcome of a completed session cannot be changed".into(),
            )));
        }
        selection.validate(reward.audience.len()).map_err(|e| {
            self.refuse(ClientError::Validation(format!("Invalid rig choice: {e}")))
        })?;

        report(
            self.notifier.as_ref(),
            "Outcome updated",
            self.api.set_rig(id, selection),
        )
        .await?;

        tracing::info!(reward_id = %id, rigged_index = selection.to_wire(), "Rig updated");
        self.refetch().await;
        Ok(())
    }

    /// Ask the service to spin the wheel
    pub async fn trigger_spin(&self, id: &str) -> ClientResult<()> {
        let reward = self.cached(id).await?;
        if !reward.can_trigger_spin() {
            return Err(self.refuse(ClientError::InvalidState(
                "Spin already triggered for this session".into(),
            )));
        }

        report(
            self.notifier.as_ref(),
            "Spin triggered",
            self.api.trigger_spin(id),
        )
        .await?;

        tracing::info!(reward_id = %id, "Spin triggered");
        self.refetch().await;
        Ok(())
    }

    /// Return a session to a fresh active state, discarding its outcome
    pub async fn reset_spin(&self, id: &str) -> ClientResult<()> {
        let reward = self.cached(id).await?;
        if !reward.can_reset_spin() {
            return Err(self.refuse(ClientError::InvalidState(
                "The wheel has not been spun yet".into(),
            )));
        }

        report(self.notifier.as_ref(), "Spin reset", self.api.reset_spin(id)).await?;

        tracing::info!(reward_id = %id, "Spin reset");
        self.refetch().await;
        Ok(())
    }

    /// Permanently delete a session after confirmation
    pub async fn delete_reward(&self, id: &str, confirm: &dyn Confirm) -> ClientResult<()> {
        let label = self
            .cache
            .get(id)
            .map(|r| format!("\"{}\"", r.title))
            .unwrap_or_else(|| "this reward".to_string());
        if !confirm.confirm(&format!("Delete {label}? This cannot be undone.")) {
            return Err(reject(self.notifier.as_ref(), ClientError::Cancelled));
        }

        report(
            self.notifier.as_ref(),
            "Reward deleted",
            self.api.delete_reward(id),
        )
        .await?;

        tracing::info!(reward_id = %id, "Reward deleted");
        self.refetch().await;
        Ok(())
    }

    /// Cached session, loading the list first if needed
    async fn cached(&self, id: &str) -> ClientResult<Reward> {
        self.cache
            .ensure_loaded(|| self.api.list_rewards())
            .await
            .map_err(|e| reject(self.notifier.as_ref(), e))?;
        self.cache
            .get(id)
            .ok_or_else(|| self.refuse(ClientError::NotFound("Reward".into())))
    }

    fn refuse(&self, err: ClientError) -> ClientError {
        reject(self.notifier.as_ref(), err)
    }

    async fn refetch(&self) {
        if let Err(e) = self.refresh().await {
            reject(self.notifier.as_ref(), e);
        }
    }
}
