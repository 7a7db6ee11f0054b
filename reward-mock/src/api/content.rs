//! Content handlers, mounted once per [`ContentKind`]

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use shared::models::{ContentDraft, ContentItem, ContentKind, Engagement};
use shared::{ApiResponse, AppResult};
use std::sync::Arc;

use crate::state::MockState;

type SharedState = State<Arc<MockState>>;

pub fn routes() -> Router<Arc<MockState>> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", put(update).delete(remove))
        .route("/{id}/toggle-visibility", put(toggle_visibility))
        .route("/{id}/like", post(like))
        .route("/{id}/share", post(share))
}

async fn list(
    State(state): SharedState,
    Extension(kind): Extension<ContentKind>,
) -> Json<ApiResponse<Vec<ContentItem>>> {
    Json(ApiResponse::ok(state.list_content(kind)))
}

async fn create(
    State(state): SharedState,
    Extension(kind): Extension<ContentKind>,
    Json(draft): Json<ContentDraft>,
) -> AppResult<Json<ApiResponse<()>>> {
    let item = state.create_content(kind, draft)?;
    tracing::info!(%kind, content_id = %item.id, "Content created");
    Ok(Json(ApiResponse::done()))
}

async fn update(
    State(state): SharedState,
    Extension(kind): Extension<ContentKind>,
    Path(id): Path<String>,
    Json(draft): Json<ContentDraft>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.update_content(kind, &id, draft)?;
    Ok(Json(ApiResponse::done()))
}

async fn remove(
    State(state): SharedState,
    Extension(kind): Extension<ContentKind>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.delete_content(kind, &id)?;
    tracing::info!(%kind, content_id = %id, "Content deleted");
    Ok(Json(ApiResponse::done()))
}

async fn toggle_visibility(
    State(state): SharedState,
    Extension(kind): Extension<ContentKind>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let visible = state.toggle_visibility(kind, &id)?;
    let message = if visible { "Now visible" } else { "Now hidden" };
    Ok(Json(ApiResponse::done_with_message(message)))
}

async fn like(
    State(state): SharedState,
    Extension(kind): Extension<ContentKind>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<u64>>> {
    Ok(Json(ApiResponse::ok(state.engage(kind, &id, Engagement::Like)?)))
}

async fn share(
    State(state): SharedState,
    Extension(kind): Extension<ContentKind>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<u64>>> {
    Ok(Json(ApiResponse::ok(state.engage(kind, &id, Engagement::Share)?)))
}
