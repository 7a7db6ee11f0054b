//! Upload signing and a local stand-in for the CDN upload API

use axum::{
    Json,
    extract::{Multipart, State},
};
use shared::models::{MediaAuth, UploadedMedia};
use shared::{AppError, AppResult, ErrorCode};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::state::MockState;

/// Bare object, no envelope
pub async fn auth(State(state): State<Arc<MockState>>) -> Json<MediaAuth> {
    Json(state.issue_media_auth())
}

fn upload_error(message: impl Into<String>) -> AppError {
    AppError::with_message(ErrorCode::UploadFailed, message)
}

pub async fn upload(
    State(state): State<Arc<MockState>>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadedMedia>> {
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut file_size = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e.to_string()))?
    {
        let name = field.name().map(str::to_string).unwrap_or_default();
        if name == "file" {
            let bytes = field.bytes().await.map_err(|e| upload_error(e.to_string()))?;
            file_size = Some(bytes.len());
        } else {
            let text = field.text().await.map_err(|e| upload_error(e.to_string()))?;
            fields.insert(name, text);
        }
    }

    let field = |key: &str| {
        fields
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| upload_error(format!("Missing field: {key}")))
    };

    let size = file_size.ok_or_else(|| upload_error("Missing field: file"))?;
    let file_name = field("fileName")?;
    let expire = field("expire")?
        .parse::<i64>()
        .map_err(|_| upload_error("Invalid expire"))?;
    state.verify_upload(field("publicKey")?, field("signature")?, expire, field("token")?)?;

    let folder = fields
        .get("folder")
        .map(|f| f.trim_end_matches('/'))
        .unwrap_or("");
    let folder = if folder.is_empty() || folder.starts_with('/') {
        folder.to_string()
    } else {
        format!("/{folder}")
    };
    let file_path = format!("{folder}/{file_name}");

    tracing::info!(file_path = %file_path, size, "Media uploaded");
    Ok(Json(UploadedMedia {
        file_id: Uuid::new_v4().simple().to_string(),
        name: file_name.to_string(),
        url: format!("https://ik.imagekit.io/mock{file_path}"),
        file_path,
    }))
}
