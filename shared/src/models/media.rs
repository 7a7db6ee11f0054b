//! Media upload models (ImageKit-style signed uploads)

use serde::{Deserialize, Serialize};

/// Upload signature issued by `GET /api/imagekit-auth`
///
/// Returned bare, without the `{ success, data }` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAuth {
    pub signature: String,
    /// Unix timestamp (seconds) after which the signature is rejected
    pub expire: i64,
    pub token: String,
}

/// Result of a successful upload to the media CDN
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedMedia {
    pub file_id: String,
    pub name: String,
    pub url: String,
    /// Path relative to the CDN endpoint, stored in banner fields
    pub file_path: String,
}
