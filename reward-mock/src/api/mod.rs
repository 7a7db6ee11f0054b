//! HTTP surface of the mock service
//!
//! Every request passes [`intercept`] first: it is logged, checked
//! against the admin token and answered with an injected failure if one
//! is queued for it.

mod content;
mod media;
mod rewards;

use axum::{
    Extension, Json, Router,
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use shared::models::ContentKind;
use shared::{ApiResponse, AppError, ErrorCode};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::{InjectedFailure, MockState};

pub fn router(state: Arc<MockState>) -> Router {
    let mut app = Router::new()
        .nest("/api/rewards", rewards::routes())
        .route("/api/imagekit-auth", get(media::auth))
        // Stand-in for the CDN upload endpoint
        .route("/upload", post(media::upload));

    for kind in ContentKind::ALL {
        app = app.nest(kind.base_path(), content::routes().layer(Extension(kind)));
    }

    app.layer(middleware::from_fn_with_state(state.clone(), intercept))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn intercept(State(state): State<Arc<MockState>>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    state.record(&method, &path);

    if let Some(token) = &state.config().admin_token {
        if path.starts_with("/api/") && !bearer_matches(req.headers(), token) {
            tracing::debug!(%method, %path, "Rejected: missing or wrong token");
            return AppError::new(ErrorCode::NotAuthenticated).into_response();
        }
    }

    if let Some(failure) = state.take_failure(&method, &path) {
        tracing::debug!(%method, %path, status = %failure.status, "Injected failure");
        return failure_response(failure);
    }

    next.run(req).await
}

fn bearer_matches(headers: &HeaderMap, token: &str) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .is_some_and(|t| t == token)
}

fn failure_response(failure: InjectedFailure) -> Response {
    let code = if failure.status.is_server_error() {
        ErrorCode::InternalError
    } else {
        ErrorCode::Unknown
    };
    match failure.message {
        Some(message) => (failure.status, Json(ApiResponse::<()>::error(code, message))).into_response(),
        None => failure.status.into_response(),
    }
}
