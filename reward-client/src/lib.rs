//! Reward Client - admin client for the reward service
//!
//! Typed access to the reward/content HTTP API plus the admin-side logic
//! that sits on top of it:
//!
//! - [`CategoryRegistry`] - reward categories
//! - [`RewardManager`] - reward sessions: create, rig, run, reset, delete
//! - [`RewardForm`] - the creation form and its audience sizing rules
//! - [`dashboard`] - which actions a session offers in its current state
//! - [`ContentManager`] - posts, webinars, career pages and ads
//! - [`MediaUploader`] - signed banner uploads to the media CDN
//! - [`SpinWatcher`] - spin lifecycle events for the public wheel
//!
//! Every mutation reports its outcome through a [`Notifier`] (the toast)
//! and refetches the affected list through a [`QueryCache`].

pub mod api;
pub mod cache;
pub mod config;
pub mod content;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod http;
pub mod manager;
pub mod media;
pub mod notify;
pub mod registry;
pub mod watcher;

use std::sync::Arc;

pub use api::AdminApi;
pub use cache::{Cacheable, QueryCache};
pub use config::{ClientConfig, MediaConfig};
pub use content::ContentManager;
pub use dashboard::{DashboardRow, RigOption, SessionAction, RANDOM_OUTCOME_LABEL};
pub use error::{ClientError, ClientResult, GENERIC_ERROR_MESSAGE};
pub use form::{CategoryForm, RewardForm};
pub use http::{HttpClient, NetworkHttpClient};
pub use manager::RewardManager;
pub use media::MediaUploader;
pub use notify::{Confirm, MemoryNotifier, Notifier, Toast, ToastKind, TracingNotifier};
pub use registry::CategoryRegistry;
pub use watcher::{MIN_POLL_INTERVAL, SpinEvent, SpinWatcher};

// Re-export shared models for convenience
pub use shared::models::{
    Category, ContentDraft, ContentItem, ContentKind, Participant, Reward, RewardStatus,
    RigSelection, SpinState, Winner,
};

/// All admin panels wired to one API client and one notifier
pub struct AdminClient<H: HttpClient = NetworkHttpClient> {
    api: AdminApi<H>,
    notifier: Arc<dyn Notifier>,
    pub categories: CategoryRegistry<H>,
    pub rewards: RewardManager<H>,
}

impl AdminClient<NetworkHttpClient> {
    /// Build the network client described by `config`
    pub fn from_config(config: &ClientConfig, notifier: Arc<dyn Notifier>) -> ClientResult<Self> {
        let http = config.build_http_client()?;
        Ok(Self::new(AdminApi::new(http), notifier))
    }
}

impl<H: HttpClient> AdminClient<H> {
    pub fn new(api: AdminApi<H>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            categories: CategoryRegistry::new(api.clone(), notifier.clone()),
            rewards: RewardManager::new(api.clone(), notifier.clone()),
            api,
            notifier,
        }
    }

    /// Manager for one content collection
    pub fn content(&self, kind: ContentKind) -> ContentManager<H> {
        ContentManager::new(kind, self.api.clone(), self.notifier.clone())
    }

    /// Banner uploader using the given CDN settings
    pub fn media(&self, config: MediaConfig) -> ClientResult<MediaUploader<H>> {
        MediaUploader::new(self.api.clone(), config, self.notifier.clone())
    }

    /// Watcher for the public spin-wheel feed
    pub fn watcher(&self, interval: std::time::Duration) -> SpinWatcher<H> {
        SpinWatcher::new(self.api.clone(), interval)
    }

    pub fn api(&self) -> &AdminApi<H> {
        &self.api
    }
}
