//! In-memory service state
//!
//! Holds the records the real service would persist, the request log and
//! the queue of injected failures. Every list is kept newest first, the
//! order the service returns them in.

use axum::http::{Method, StatusCode};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use rand::Rng;
use std::collections::HashMap;
use uuid::Uuid;

use shared::models::{
    Category, ContentDraft, ContentItem, ContentKind, Engagement, MediaAuth, Participant,
    RewardCreate, RewardRecord, RewardStatus, RigSelection, Winner, RANDOM_RIG_INDEX,
};
use shared::validation::{
    MAX_NAME_LEN, MAX_TITLE_LEN, validate_audience, validate_required_text,
};
use shared::{AppError, AppResult, ErrorCode};

use crate::config::Config;

/// Lifetime of an upload signature, in seconds
const MEDIA_AUTH_TTL_SECS: i64 = 30 * 60;

/// One request as seen by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
}

/// Canned answer for the next request matching `method` and `path`
#[derive(Debug, Clone)]
pub struct InjectedFailure {
    pub method: Method,
    pub path: String,
    pub status: StatusCode,
    /// Sent as `message`; `None` sends an empty error body
    pub message: Option<String>,
}

#[derive(Debug, Default)]
struct Store {
    categories: Vec<Category>,
    rewards: Vec<RewardRecord>,
    content: HashMap<ContentKind, Vec<ContentItem>>,
    /// Issued upload signatures by token
    media_auth: HashMap<String, MediaAuth>,
}

/// Shared state behind every handler
#[derive(Debug)]
pub struct MockState {
    config: Config,
    store: RwLock<Store>,
    requests: Mutex<Vec<RecordedRequest>>,
    failures: Mutex<Vec<InjectedFailure>>,
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

impl MockState {
    pub fn new(config: Config) -> Self {
        let state = Self {
            store: RwLock::new(Store::default()),
            requests: Mutex::new(Vec::new()),
            failures: Mutex::new(Vec::new()),
            config,
        };
        if state.config.seed {
            state.seed();
        }
        state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ========== Request log ==========

    pub fn record(&self, method: &Method, path: &str) {
        self.requests.lock().push(RecordedRequest {
            method: method.clone(),
            path: path.to_string(),
        });
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// How many requests hit exactly `method path`
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().clear();
    }

    // ========== Failure injection ==========

    /// Answer the next `method path` request with `status` instead of
    /// handling it
    pub fn fail_next(
        &self,
        method: Method,
        path: impl Into<String>,
        status: StatusCode,
        message: Option<&str>,
    ) {
        self.failures.lock().push(InjectedFailure {
            method,
            path: path.into(),
            status,
            message: message.map(str::to_string),
        });
    }

    /// Remove and return the first failure queued for this request
    pub fn take_failure(&self, method: &Method, path: &str) -> Option<InjectedFailure> {
        let mut failures = self.failures.lock();
        let pos = failures
            .iter()
            .position(|f| &f.method == method && f.path == path)?;
        Some(failures.remove(pos))
    }

    // ========== Categories ==========

    pub fn list_categories(&self) -> Vec<Category> {
        self.store.read().categories.clone()
    }

    pub fn create_category(&self, name: &str) -> AppResult<Category> {
        let name = name.trim();
        validate_required_text(name, "Category name", MAX_NAME_LEN)?;

        let mut store = self.store.write();
        if store
            .categories
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(name))
        {
            return Err(AppError::with_message(
                ErrorCode::CategoryNameExists,
                "Category already exists",
            ));
        }

        let category = Category {
            id: new_id(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        store.categories.insert(0, category.clone());
        Ok(category)
    }

    /// Rewards keep their `categoryId`
    pub fn delete_category(&self, id: &str) -> AppResult<()> {
        let mut store = self.store.write();
        let before = store.categories.len();
        store.categories.retain(|c| c.id != id);
        if store.categories.len() == before {
            return Err(AppError::new(ErrorCode::CategoryNotFound));
        }
        Ok(())
    }

    // ========== Rewards ==========

    pub fn list_rewards(&self) -> Vec<RewardRecord> {
        self.store.read().rewards.clone()
    }

    pub fn reward(&self, id: &str) -> Option<RewardRecord> {
        self.store.read().rewards.iter().find(|r| r.id == id).cloned()
    }

    /// Put a record in as-is, bypassing validation
    pub fn insert_reward(&self, record: RewardRecord) {
        self.store.write().rewards.insert(0, record);
    }

    pub fn create_reward(&self, payload: RewardCreate) -> AppResult<RewardRecord> {
        validate_required_text(&payload.title, "Title", MAX_TITLE_LEN)?;
        validate_audience(&payload.audience)?;

        let mut store = self.store.write();
        let category_id = payload.category_id.filter(|id| !id.trim().is_empty());
        if let Some(category_id) = &category_id {
            if !store.categories.iter().any(|c| &c.id == category_id) {
                return Err(AppError::new(ErrorCode::CategoryNotFound));
            }
        }

        let record = RewardRecord {
            id: new_id(),
            title: payload.title.trim().to_string(),
            description: Some(payload.description),
            banner_url: Some(payload.banner_url),
            button_text: Some(payload.button_text),
            button_link: Some(payload.button_link),
            category_id,
            audience: payload.audience,
            status: RewardStatus::Active,
            rigged_index: RANDOM_RIG_INDEX,
            winner: None,
            spin_triggered_at: None,
            created_at: Utc::now(),
        };
        store.rewards.insert(0, record.clone());
        Ok(record)
    }

    pub fn set_rig(&self, id: &str, rigged_index: i64) -> AppResult<()> {
        self.with_reward(id, |reward| {
            if reward.status == RewardStatus::Completed {
                return Err(AppError::new(ErrorCode::RewardCompleted));
            }
            RigSelection::from_wire(rigged_index, reward.audience.len()).map_err(|e| {
                AppError::with_message(ErrorCode::RigIndexOutOfRange, e.to_string())
                    .with_detail("riggedIndex", rigged_index)
            })?;
            reward.rigged_index = rigged_index;
            Ok(())
        })
    }

    /// Mark the spin as requested; the outcome is picked by
    /// [`MockState::resolve_spin`]
    pub fn trigger_spin(&self, id: &str) -> AppResult<DateTime<Utc>> {
        self.with_reward(id, |reward| {
            if reward.status == RewardStatus::Completed {
                return Err(AppError::new(ErrorCode::RewardCompleted));
            }
            if reward.spin_triggered_at.is_some() {
                return Err(AppError::new(ErrorCode::SpinAlreadyTriggered));
            }
            let now = Utc::now();
            reward.spin_triggered_at = Some(now);
            Ok(now)
        })
    }

    /// Back to a fresh active session; the rig choice is kept
    pub fn reset_spin(&self, id: &str) -> AppResult<()> {
        self.with_reward(id, |reward| {
            if reward.status == RewardStatus::Active && reward.spin_triggered_at.is_none() {
                return Err(AppError::new(ErrorCode::SpinNotTriggered));
            }
            reward.status = RewardStatus::Active;
            reward.winner = None;
            reward.spin_triggered_at = None;
            Ok(())
        })
    }

    pub fn delete_reward(&self, id: &str) -> AppResult<()> {
        let mut store = self.store.write();
        let before = store.rewards.len();
        store.rewards.retain(|r| r.id != id);
        if store.rewards.len() == before {
            return Err(AppError::new(ErrorCode::RewardNotFound));
        }
        Ok(())
    }

    /// Pick the winner of a triggered spin
    ///
    /// The rigged participant wins if one is set, otherwise every
    /// participant has the same chance.
    pub fn resolve_spin(&self, id: &str) -> AppResult<Winner> {
        self.with_reward(id, |reward| {
            if reward.status == RewardStatus::Completed {
                return Err(AppError::new(ErrorCode::RewardCompleted));
            }
            if reward.spin_triggered_at.is_none() {
                return Err(AppError::new(ErrorCode::SpinNotTriggered));
            }
            if reward.audience.is_empty() {
                return Err(AppError::validation("Cannot spin without participants"));
            }

            let index = match RigSelection::from_wire(reward.rigged_index, reward.audience.len()) {
                Ok(RigSelection::Participant(slot)) => slot,
                _ => rand::thread_rng().gen_range(0..reward.audience.len()),
            };
            let winner = Winner::from_participant(&reward.audience[index], index);
            reward.status = RewardStatus::Completed;
            reward.winner = Some(winner.clone());
            Ok(winner)
        })
    }

    /// Resolve only if the spin requested at `triggered_at` is still pending
    pub fn resolve_if_pending(&self, id: &str, triggered_at: DateTime<Utc>) -> Option<Winner> {
        let pending = self
            .reward(id)
            .is_some_and(|r| r.status == RewardStatus::Active && r.spin_triggered_at == Some(triggered_at));
        if !pending {
            return None;
        }
        self.resolve_spin(id).ok()
    }

    fn with_reward<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut RewardRecord) -> AppResult<R>,
    ) -> AppResult<R> {
        let mut store = self.store.write();
        let reward = store
            .rewards
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::new(ErrorCode::RewardNotFound))?;
        f(reward)
    }

    // ========== Content ==========

    pub fn list_content(&self, kind: ContentKind) -> Vec<ContentItem> {
        self.store
            .read()
            .content
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }

    pub fn insert_content(&self, kind: ContentKind, item: ContentItem) {
        self.store
            .write()
            .content
            .entry(kind)
            .or_default()
            .insert(0, item);
    }

    pub fn create_content(&self, kind: ContentKind, draft: ContentDraft) -> AppResult<ContentItem> {
        validate_required_text(&draft.title, "Title", MAX_TITLE_LEN)?;
        let item = ContentItem {
            id: new_id(),
            title: draft.title.trim().to_string(),
            body: draft.body,
            image_url: draft.image_url,
            link: draft.link,
            is_visible: true,
            likes: 0,
            shares: 0,
            created_at: Utc::now(),
        };
        self.insert_content(kind, item.clone());
        Ok(item)
    }

    pub fn update_content(&self, kind: ContentKind, id: &str, draft: ContentDraft) -> AppResult<()> {
        validate_required_text(&draft.title, "Title", MAX_TITLE_LEN)?;
        self.with_content(kind, id, |item| {
            item.title = draft.title.trim().to_string();
            item.body = draft.body;
            item.image_url = draft.image_url;
            item.link = draft.link;
        })
    }

    pub fn delete_content(&self, kind: ContentKind, id: &str) -> AppResult<()> {
        let mut store = self.store.write();
        let items = store.content.entry(kind).or_default();
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return Err(AppError::new(ErrorCode::ContentNotFound));
        }
        Ok(())
    }

    /// Flip visibility, returning the new value
    pub fn toggle_visibility(&self, kind: ContentKind, id: &str) -> AppResult<bool> {
        self.with_content(kind, id, |item| {
            item.is_visible = !item.is_visible;
            item.is_visible
        })
    }

    /// Bump a counter, returning the new value
    pub fn engage(&self, kind: ContentKind, id: &str, engagement: Engagement) -> AppResult<u64> {
        self.with_content(kind, id, |item| {
            let counter = engagement.counter(item);
            *counter += 1;
            *counter
        })
    }

    fn with_content<R>(
        &self,
        kind: ContentKind,
        id: &str,
        f: impl FnOnce(&mut ContentItem) -> R,
    ) -> AppResult<R> {
        let mut store = self.store.write();
        store
            .content
            .get_mut(&kind)
            .and_then(|items| items.iter_mut().find(|i| i.id == id))
            .map(f)
            .ok_or_else(|| AppError::new(ErrorCode::ContentNotFound))
    }

    // ========== Media ==========

    /// Issue a one-time upload signature
    ///
    /// Signatures that expired unused are dropped here.
    pub fn issue_media_auth(&self) -> MediaAuth {
        let now = Utc::now().timestamp();
        let auth = MediaAuth {
            signature: new_id(),
            expire: now + MEDIA_AUTH_TTL_SECS,
            token: Uuid::new_v4().to_string(),
        };
        let mut store = self.store.write();
        store.media_auth.retain(|_, issued| issued.expire >= now);
        store.media_auth.insert(auth.token.clone(), auth.clone());
        auth
    }

    /// Check and consume an upload signature
    pub fn verify_upload(
        &self,
        public_key: &str,
        signature: &str,
        expire: i64,
        token: &str,
    ) -> AppResult<()> {
        if public_key != self.config.media_public_key {
            return Err(AppError::with_message(
                ErrorCode::UploadFailed,
                "Invalid public key",
            ));
        }
        let auth = self
            .store
            .write()
            .media_auth
            .remove(token)
            .ok_or_else(|| AppError::with_message(ErrorCode::UploadFailed, "Unknown upload token"))?;
        if auth.signature != signature || auth.expire != expire {
            return Err(AppError::with_message(
                ErrorCode::UploadFailed,
                "Signature mismatch",
            ));
        }
        if expire < Utc::now().timestamp() {
            return Err(AppError::with_message(
                ErrorCode::UploadFailed,
                "Upload signature expired",
            ));
        }
        Ok(())
    }

    // ========== Demo data ==========

    fn seed(&self) {
        let festive = self.create_category("Festive");
        let _ = self.create_category("Weekly Draw");

        let audience = vec![
            Participant::new("Asha Rao", "9000000001"),
            Participant::new("Ravi Kumar", "9000000002"),
            Participant::new("Meera Iyer", "9000000003"),
        ];
        let _ = self.create_reward(RewardCreate {
            title: "Diwali Lucky Spin".to_string(),
            description: "One lucky customer wins a gift hamper".to_string(),
            button_text: "Claim".to_string(),
            button_link: "https://example.com/claim".to_string(),
            category_id: festive.ok().map(|c| c.id),
            audience,
            ..Default::default()
        });

        for title in ["Launch week recap", "Hiring: backend engineers"] {
            let _ = self.create_content(
                ContentKind::Post,
                ContentDraft {
                    title: title.to_string(),
                    ..Default::default()
                },
            );
        }
        tracing::info!("Seeded demo data");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_reward(audience: usize) -> (MockState, String) {
        let state = MockState::new(Config::ephemeral());
        let reward = state
            .create_reward(RewardCreate {
                title: "Spin".into(),
                audience: (0..audience)
                    .map(|i| Participant::new(format!("P{i}"), format!("{i}")))
                    .collect(),
                ..Default::default()
            })
            .unwrap();
        (state, reward.id)
    }

    #[test]
    fn test_rigged_spin_always_picks_rigged_participant() {
        let (state, id) = state_with_reward(4);
        for _ in 0..10 {
            state.set_rig(&id, 2).unwrap();
            state.trigger_spin(&id).unwrap();
            assert_eq!(state.resolve_spin(&id).unwrap().index, 2);
            state.reset_spin(&id).unwrap();
        }
    }

    #[test]
    fn test_random_spin_stays_in_range() {
        let (state, id) = state_with_reward(3);
        for _ in 0..20 {
            state.trigger_spin(&id).unwrap();
            assert!(state.resolve_spin(&id).unwrap().index < 3);
            state.reset_spin(&id).unwrap();
        }
    }

    #[test]
    fn test_lifecycle_conflicts() {
        let (state, id) = state_with_reward(2);
        assert_eq!(
            state.reset_spin(&id).unwrap_err().code,
            ErrorCode::SpinNotTriggered
        );
        state.trigger_spin(&id).unwrap();
        assert_eq!(
            state.trigger_spin(&id).unwrap_err().code,
            ErrorCode::SpinAlreadyTriggered
        );
        state.resolve_spin(&id).unwrap();
        assert_eq!(
            state.set_rig(&id, 0).unwrap_err().code,
            ErrorCode::RewardCompleted
        );
        state.reset_spin(&id).unwrap();
        let record = state.reward(&id).unwrap();
        assert_eq!(record.status, RewardStatus::Active);
        assert!(record.winner.is_none() && record.spin_triggered_at.is_none());
    }

    #[test]
    fn test_rig_out_of_range_rejected() {
        let (state, id) = state_with_reward(2);
        let err = state.set_rig(&id, 2).unwrap_err();
        assert_eq!(err.code, ErrorCode::RigIndexOutOfRange);
        state.set_rig(&id, RANDOM_RIG_INDEX).unwrap();
    }

    #[test]
    fn test_deleting_category_keeps_rewards() {
        let state = MockState::new(Config::ephemeral());
        let category = state.create_category("Festive").unwrap();
        state
            .create_reward(RewardCreate {
                title: "Spin".into(),
                category_id: Some(category.id.clone()),
                ..Default::default()
            })
            .unwrap();
        state.delete_category(&category.id).unwrap();
        assert_eq!(
            state.list_rewards()[0].category_id.as_deref(),
            Some(category.id.as_str())
        );
    }

    #[test]
    fn test_duplicate_category_name_conflicts() {
        let state = MockState::new(Config::ephemeral());
        state.create_category("Festive").unwrap();
        let err = state.create_category("festive").unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryNameExists);
        assert_eq!(err.message, "Category already exists");
    }

    #[test]
    fn test_failure_injection_consumed_once() {
        let state = MockState::new(Config::ephemeral());
        state.fail_next(Method::POST, "/api/rewards", StatusCode::INTERNAL_SERVER_ERROR, None);
        assert!(state.take_failure(&Method::GET, "/api/rewards").is_none());
        assert!(state.take_failure(&Method::POST, "/api/rewards").is_some());
        assert!(state.take_failure(&Method::POST, "/api/rewards").is_none());
    }

    #[test]
    fn test_media_signature_single_use() {
        let state = MockState::new(Config::ephemeral());
        let auth = state.issue_media_auth();
        state
            .verify_upload("public_mock_key", &auth.signature, auth.expire, &auth.token)
            .unwrap();
        assert!(
            state
                .verify_upload("public_mock_key", &auth.signature, auth.expire, &auth.token)
                .is_err()
        );
    }

    #[test]
    fn test_expired_signatures_dropped_on_issue() {
        let state = MockState::new(Config::ephemeral());
        let stale = MediaAuth {
            signature: "stale".into(),
            expire: Utc::now().timestamp() - 1,
            token: "stale-token".into(),
        };
        state
            .store
            .write()
            .media_auth
            .insert(stale.token.clone(), stale);
        let unused = state.issue_media_auth();

        let fresh = state.issue_media_auth();

        let store = state.store.read();
        assert!(!store.media_auth.contains_key("stale-token"));
        assert!(store.media_auth.contains_key(&unused.token));
        assert!(store.media_auth.contains_key(&fresh.token));
    }
}
