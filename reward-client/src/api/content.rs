//! Content endpoints (posts, webinars, career pages, ads)

use serde_json::Value;
use shared::ApiResponse;
use shared::models::{ContentDraft, ContentItem, ContentKind, Engagement};

use super::{AdminApi, ServerMessage, expect_data, expect_success};
use crate::error::ClientResult;
use crate::http::HttpClient;

impl<H: HttpClient> AdminApi<H> {
    /// GET /api/{kind}
    pub async fn list_content(&self, kind: ContentKind) -> ClientResult<Vec<ContentItem>> {
        let resp: ApiResponse<Vec<ContentItem>> = self.http.get(kind.base_path()).await?;
        expect_data(resp, kind.name())
    }

    /// POST /api/{kind}
    pub async fn create_content(
        &self,
        kind: ContentKind,
        draft: &ContentDraft,
    ) -> ClientResult<ServerMessage> {
        let resp: ApiResponse<Value> = self.http.post(kind.base_path(), draft).await?;
        Ok(expect_success(resp)?.1)
    }

    /// PUT /api/{kind}/{id}
    pub async fn update_content(
        &self,
        kind: ContentKind,
        id: &str,
        draft: &ContentDraft,
    ) -> ClientResult<ServerMessage> {
        let path = format!("{}/{id}", kind.base_path());
        let resp: ApiResponse<Value> = self.http.put(&path, draft).await?;
        Ok(expect_success(resp)?.1)
    }

    /// DELETE /api/{kind}/{id}
    pub async fn delete_content(&self, kind: ContentKind, id: &str) -> ClientResult<ServerMessage> {
        let path = format!("{}/{id}", kind.base_path());
        let resp: ApiResponse<Value> = self.http.delete(&path).await?;
        Ok(expect_success(resp)?.1)
    }

    /// PUT /api/{kind}/{id}/toggle-visibility
    pub async fn toggle_visibility(
        &self,
        kind: ContentKind,
        id: &str,
    ) -> ClientResult<ServerMessage> {
        let path = format!("{}/{id}/toggle-visibility", kind.base_path());
        let resp: ApiResponse<Value> = self.http.put_empty(&path).await?;
        Ok(expect_success(resp)?.1)
    }

    /// POST /api/{kind}/{id}/like | /share
    pub async fn engage(
        &self,
        kind: ContentKind,
        id: &str,
        engagement: Engagement,
    ) -> ClientResult<ServerMessage> {
        let path = format!("{}/{id}/{}", kind.base_path(), engagement.action());
        let resp: ApiResponse<Value> = self.http.post_empty(&path).await?;
        Ok(expect_success(resp)?.1)
    }
}
