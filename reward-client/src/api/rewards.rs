//! Category and reward session endpoints

use serde_json::Value;
use shared::ApiResponse;
use shared::models::{
    Category, CategoryCreate, Reward, RewardCreate, RewardRecord, RigSelection, RigUpdate,
};

use super::{AdminApi, ServerMessage, expect_data, expect_success};
use crate::error::ClientResult;
use crate::http::HttpClient;

const CATEGORIES: &str = "/api/rewards/categories";
const REWARDS: &str = "/api/rewards";

impl<H: HttpClient> AdminApi<H> {
    // ========== Categories ==========

    /// GET /api/rewards/categories
    pub async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        let resp: ApiResponse<Vec<Category>> = self.http.get(CATEGORIES).await?;
        expect_data(resp, "category")
    }

    /// POST /api/rewards/categories
    pub async fn create_category(&self, name: &str) -> ClientResult<ServerMessage> {
        let body = CategoryCreate {
            name: name.to_string(),
        };
        let resp: ApiResponse<Value> = self.http.post(CATEGORIES, &body).await?;
        Ok(expect_success(resp)?.1)
    }

    /// DELETE /api/rewards/categories/{id}
    pub async fn delete_category(&self, id: &str) -> ClientResult<ServerMessage> {
        let resp: ApiResponse<Value> = self.http.delete(&format!("{CATEGORIES}/{id}")).await?;
        Ok(expect_success(resp)?.1)
    }

    // ========== Reward sessions ==========

    /// GET /api/rewards, raw records
    pub async fn list_reward_records(&self) -> ClientResult<Vec<RewardRecord>> {
        let resp: ApiResponse<Vec<RewardRecord>> = self.http.get(REWARDS).await?;
        expect_data(resp, "reward")
    }

    /// GET /api/rewards
    ///
    /// Records whose spin fields contradict each other are skipped.
    pub async fn list_rewards(&self) -> ClientResult<Vec<Reward>> {
        let records = self.list_reward_records().await?;
        let rewards = records
            .into_iter()
            .filter_map(|record| {
                let id = record.id.clone();
                match Reward::try_from(record) {
                    Ok(reward) => Some(reward),
                    Err(e) => {
                        tracing::warn!(reward_id = %id, error = %e, "Skipping malformed reward");
                        None
                    }
                }
            })
            .collect();
        Ok(rewards)
    }

    /// POST /api/rewards
    pub async fn create_reward(&self, payload: &RewardCreate) -> ClientResult<ServerMessage> {
        let resp: ApiResponse<Value> = self.http.post(REWARDS, payload).await?;
        Ok(expect_success(resp)?.1)
    }

    /// PUT /api/rewards/{id}/rig
    pub async fn set_rig(&self, id: &str, selection: RigSelection) -> ClientResult<ServerMessage> {
        let body = RigUpdate::from(selection);
        let resp: ApiResponse<Value> = self.http.put(&format!("{REWARDS}/{id}/rig"), &body).await?;
        Ok(expect_success(resp)?.1)
    }

    /// PUT /api/rewards/{id}/trigger-spin
    pub async fn trigger_spin(&self, id: &str) -> ClientResult<ServerMessage> {
        let resp: ApiResponse<Value> = self
            .http
            .put_empty(&format!("{REWARDS}/{id}/trigger-spin"))
            .await?;
        Ok(expect_success(resp)?.1)
    }

    /// PUT /api/rewards/{id}/reset-spin
    pub async fn reset_spin(&self, id: &str) -> ClientResult<ServerMessage> {
        let resp: ApiResponse<Value> = self
            .http
            .put_empty(&format!("{REWARDS}/{id}/reset-spin"))
            .await?;
        Ok(expect_success(resp)?.1)
    }

    /// DELETE /api/rewards/{id}
    pub async fn delete_reward(&self, id: &str) -> ClientResult<ServerMessage> {
        let resp: ApiResponse<Value> = self.http.delete(&format!("{REWARDS}/{id}")).await?;
        Ok(expect_success(resp)?.1)
    }
}
