//! Category and reward session handlers

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post, put},
};
use shared::models::{Category, CategoryCreate, RewardCreate, RewardRecord, RigUpdate, Winner};
use shared::{ApiResponse, AppResult};
use std::sync::Arc;

use crate::state::MockState;

type SharedState = State<Arc<MockState>>;

pub fn routes() -> Router<Arc<MockState>> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/{id}", delete(delete_category))
        .route("/{id}", delete(remove))
        .route("/{id}/rig", put(set_rig))
        .route("/{id}/trigger-spin", put(trigger_spin))
        .route("/{id}/reset-spin", put(reset_spin))
        // Development hook: resolve a triggered spin right away
        .route("/{id}/resolve", post(resolve))
}

// ========== Categories ==========

async fn list_categories(State(state): SharedState) -> Json<ApiResponse<Vec<Category>>> {
    Json(ApiResponse::ok(state.list_categories()))
}

async fn create_category(
    State(state): SharedState,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<ApiResponse<()>>> {
    let category = state.create_category(&payload.name)?;
    tracing::info!(category_id = %category.id, name = %category.name, "Category created");
    Ok(Json(ApiResponse::done_with_message(
        "Category created successfully",
    )))
}

async fn delete_category(
    State(state): SharedState,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.delete_category(&id)?;
    tracing::info!(category_id = %id, "Category deleted");
    Ok(Json(ApiResponse::done_with_message("Category deleted")))
}

// ========== Reward sessions ==========

async fn list(State(state): SharedState) -> Json<ApiResponse<Vec<RewardRecord>>> {
    Json(ApiResponse::ok(state.list_rewards()))
}

async fn create(
    State(state): SharedState,
    Json(payload): Json<RewardCreate>,
) -> AppResult<Json<ApiResponse<()>>> {
    let record = state.create_reward(payload)?;
    tracing::info!(
        reward_id = %record.id,
        audience = record.audience.len(),
        "Reward created"
    );
    Ok(Json(ApiResponse::done_with_message(
        "Reward created successfully",
    )))
}

async fn set_rig(
    State(state): SharedState,
    Path(id): Path<String>,
    Json(payload): Json<RigUpdate>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.set_rig(&id, payload.rigged_index)?;
    tracing::info!(reward_id = %id, rigged_index = payload.rigged_index, "Rig updated");
    Ok(Json(ApiResponse::done()))
}

async fn trigger_spin(
    State(state): SharedState,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let triggered_at = state.trigger_spin(&id)?;
    tracing::info!(reward_id = %id, "Spin triggered");

    if let Some(delay) = state.config().spin_delay {
        let state = state.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // A reset in the meantime cancels this resolution
            if let Some(winner) = state.resolve_if_pending(&id, triggered_at) {
                tracing::info!(reward_id = %id, winner = winner.index, "Spin resolved");
            }
        });
    }

    Ok(Json(ApiResponse::done()))
}

async fn reset_spin(
    State(state): SharedState,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.reset_spin(&id)?;
    tracing::info!(reward_id = %id, "Spin reset");
    Ok(Json(ApiResponse::done()))
}

async fn remove(
    State(state): SharedState,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.delete_reward(&id)?;
    tracing::info!(reward_id = %id, "Reward deleted");
    Ok(Json(ApiResponse::done()))
}

async fn resolve(
    State(state): SharedState,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Winner>>> {
    let winner = state.resolve_spin(&id)?;
    tracing::info!(reward_id = %id, winner = winner.index, "Spin resolved");
    Ok(Json(ApiResponse::ok(winner)))
}
