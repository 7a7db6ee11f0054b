//! Content managers (posts, webinars, career pages, ads)
//!
//! Same list-and-refetch flow as the reward panels. Like and share are the
//! exception: the counter is bumped in the cache first and rolled back if
//! the request fails.

use std::sync::Arc;

use shared::models::{ContentDraft, ContentItem, ContentKind, Engagement};
use shared::validation::{
    MAX_DESCRIPTION_LEN, MAX_TITLE_LEN, MAX_URL_LEN, validate_optional_text,
    validate_required_text,
};

use crate::api::AdminApi;
use crate::cache::QueryCache;
use crate::error::{ClientError, ClientResult};
use crate::http::{HttpClient, NetworkHttpClient};
use crate::notify::{Confirm, Notifier, reject, report};

/// One content collection
#[derive(Clone)]
pub struct ContentManager<H: HttpClient = NetworkHttpClient> {
    kind: ContentKind,
    api: AdminApi<H>,
    notifier: Arc<dyn Notifier>,
    cache: Arc<QueryCache<ContentItem>>,
}

impl<H: HttpClient> ContentManager<H> {
    pub fn new(kind: ContentKind, api: AdminApi<H>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            kind,
            api,
            notifier,
            cache: Arc::new(QueryCache::new()),
        }
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub async fn refresh(&self) -> ClientResult<Vec<ContentItem>> {
        self.cache.refresh(|| self.api.list_content(self.kind)).await
    }

    /// Cached items, in server order
    pub fn items(&self) -> Vec<ContentItem> {
        self.cache.snapshot()
    }

    pub fn get(&self, id: &str) -> Option<ContentItem> {
        self.cache.get(id)
    }

    /// Case-insensitive search on title and body
    pub fn filter(&self, query: &str, visible_only: bool) -> Vec<ContentItem> {
        self.cache
            .snapshot()
            .into_iter()
            .filter(|item| !visible_only || item.is_visible)
            .filter(|item| item.matches(query))
            .collect()
    }

    pub async fn create(&self, draft: &ContentDraft) -> ClientResult<()> {
        validate_draft(draft).map_err(|e| reject(self.notifier.as_ref(), e))?;

        let success = format!("{} created", capitalize(self.kind.name()));
        report(
            self.notifier.as_ref(),
            &success,
            self.api.create_content(self.kind, draft),
        )
        .await?;

        tracing::info!(kind = %self.kind, title = %draft.title, "Content created");
        self.refetch().await;
        Ok(())
    }

    pub async fn update(&self, id: &str, draft: &ContentDraft) -> ClientResult<()> {
        validate_draft(draft).map_err(|e| reject(self.notifier.as_ref(), e))?;

        let success = format!("{} updated", capitalize(self.kind.name()));
        report(
            self.notifier.as_ref(),
            &success,
            self.api.update_content(self.kind, id, draft),
        )
        .await?;

        tracing::info!(kind = %self.kind, content_id = %id, "Content updated");
        self.refetch().await;
        Ok(())
    }

    /// Delete an item after confirmation
    pub async fn delete(&self, id: &str, confirm: &dyn Confirm) -> ClientResult<()> {
        if !confirm.confirm(&format!("Delete this {}?", self.kind.name())) {
            return Err(reject(self.notifier.as_ref(), ClientError::Cancelled));
        }

        let success = format!("{} deleted", capitalize(self.kind.name()));
        report(
            self.notifier.as_ref(),
            &success,
            self.api.delete_content(self.kind, id),
        )
        .await?;

        tracing::info!(kind = %self.kind, content_id = %id, "Content deleted");
        self.refetch().await;
        Ok(())
    }

    /// Show or hide an item on the public site
    pub async fn toggle_visibility(&self, id: &str) -> ClientResult<()> {
        report(
            self.notifier.as_ref(),
            "Visibility updated",
            self.api.toggle_visibility(self.kind, id),
        )
        .await?;

        self.refetch().await;
        Ok(())
    }

    pub async fn like(&self, id: &str) -> ClientResult<u64> {
        self.engage(id, Engagement::Like).await
    }

    pub async fn share(&self, id: &str) -> ClientResult<u64> {
        self.engage(id, Engagement::Share).await
    }

    /// Optimistically bump a counter, undoing it if the server refuses
    ///
    /// Returns the counter value the cache holds afterwards. No toast on
    /// success and no refetch; the bumped value is the expected server
    /// state.
    async fn engage(&self, id: &str, engagement: Engagement) -> ClientResult<u64> {
        let generation = self.cache.generation();
        let bumped = self
            .cache
            .update(id, |item| {
                let counter = engagement.counter(item);
                *counter += 1;
                *counter
            })
            .ok_or_else(|| {
                reject(
                    self.notifier.as_ref(),
                    ClientError::NotFound(capitalize(self.kind.name())),
                )
            })?;

        match self.api.engage(self.kind, id, engagement).await {
            Ok(_) => Ok(bumped),
            Err(e) => {
                // A refetch landed meanwhile; the server list is authoritative.
                if self.cache.generation() == generation {
                    self.cache.update(id, |item| {
                        let counter = engagement.counter(item);
                        *counter = counter.saturating_sub(1);
                    });
                    tracing::debug!(content_id = %id, action = engagement.action(), "Rolled back");
                }
                Err(reject(self.notifier.as_ref(), e))
            }
        }
    }

    async fn refetch(&self) {
        if let Err(e) = self.refresh().await {
            reject(self.notifier.as_ref(), e);
        }
    }
}

fn validate_draft(draft: &ContentDraft) -> ClientResult<()> {
    validate_required_text(&draft.title, "Title", MAX_TITLE_LEN)?;
    validate_optional_text(draft.body.as_deref(), "Body", MAX_DESCRIPTION_LEN)?;
    validate_optional_text(draft.image_url.as_deref(), "Image URL", MAX_URL_LEN)?;
    validate_optional_text(draft.link.as_deref(), "Link", MAX_URL_LEN)?;
    Ok(())
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>().replace('-', " "),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_kind_names() {
        assert_eq!(capitalize(ContentKind::Post.name()), "Post");
        assert_eq!(capitalize(ContentKind::CareerPage.name()), "Career page");
    }

    #[test]
    fn test_draft_requires_title() {
        let draft = ContentDraft {
            title: " ".into(),
            ..Default::default()
        };
        assert!(matches!(validate_draft(&draft), Err(ClientError::Validation(_))));
    }
}
