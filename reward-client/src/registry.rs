//! Category registry panel

use std::sync::Arc;

use shared::models::Category;

use crate::api::AdminApi;
use crate::cache::QueryCache;
use crate::error::{ClientError, ClientResult};
use crate::form::CategoryForm;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::notify::{Confirm, Notifier, reject, report};

/// Reward categories: list, create, delete
///
/// Deleting a category leaves the rewards that reference it untouched.
#[derive(Clone)]
pub struct CategoryRegistry<H: HttpClient = NetworkHttpClient> {
    api: AdminApi<H>,
    notifier: Arc<dyn Notifier>,
    cache: Arc<QueryCache<Category>>,
}

impl<H: HttpClient> CategoryRegistry<H> {
    pub fn new(api: AdminApi<H>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            cache: Arc::new(QueryCache::new()),
        }
    }

    /// Fetch the category list from the server
    pub async fn refresh(&self) -> ClientResult<Vec<Category>> {
        self.cache.refresh(|| self.api.list_categories()).await
    }

    /// Cached categories, in server order
    pub fn categories(&self) -> Vec<Category> {
        self.cache.snapshot()
    }

    pub fn cache(&self) -> &QueryCache<Category> {
        &self.cache
    }

    /// Create a category from the input form
    ///
    /// The input is cleared only when the server accepted the name.
    pub async fn create_category(&self, form: &mut CategoryForm) -> ClientResult<()> {
        let name = form
            .validated_name()
            .map_err(|e| reject(self.notifier.as_ref(), e))?;

        report(
            self.notifier.as_ref(),
            "Category created",
            self.api.create_category(&name),
        )
        .await?;

        tracing::info!(name = %name, "Category created");
        form.clear();
        self.refetch().await;
        Ok(())
    }

    /// Delete a category after confirmation
    pub async fn delete_category(&self, id: &str, confirm: &dyn Confirm) -> ClientResult<()> {
        let label = self
            .cache
            .get(id)
            .map(|c| format!("\"{}\"", c.name))
            .unwrap_or_else(|| "this category".to_string());
        if !confirm.confirm(&format!("Delete {label}? Rewards in it are kept.")) {
            return Err(reject(self.notifier.as_ref(), ClientError::Cancelled));
        }

        report(
            self.notifier.as_ref(),
            "Category deleted",
            self.api.delete_category(id),
        )
        .await?;

        tracing::info!(category_id = %id, "Category deleted");
        self.refetch().await;
        Ok(())
    }

    /// Refetch after a successful mutation; a failure only costs a toast
    async fn refetch(&self) {
        if let Err(e) = self.refresh().await {
            reject(self.notifier.as_ref(), e);
        }
    }
}
