//! Media signature endpoint

use shared::models::MediaAuth;

use super::AdminApi;
use crate::error::ClientResult;
use crate::http::HttpClient;

impl<H: HttpClient> AdminApi<H> {
    /// GET /api/imagekit-auth
    ///
    /// This endpoint answers with a bare object, not the usual envelope.
    pub async fn media_auth(&self) -> ClientResult<MediaAuth> {
        self.http.get("/api/imagekit-auth").await
    }
}
