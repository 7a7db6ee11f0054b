//! Banner uploads to the media CDN
//!
//! Two steps: the reward service signs the upload (`/api/imagekit-auth`),
//! then the file goes straight to the CDN as a multipart form. The
//! returned `filePath` is what the form stores as the banner.

use std::sync::Arc;

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use shared::models::UploadedMedia;

use crate::api::AdminApi;
use crate::config::MediaConfig;
use crate::error::{ClientError, ClientResult};
use crate::form::RewardForm;
use crate::http::{HttpClient, NetworkHttpClient, handle_response};
use crate::notify::{Notifier, reject};

/// Signed uploader for banner images
#[derive(Clone)]
pub struct MediaUploader<H: HttpClient = NetworkHttpClient> {
    api: AdminApi<H>,
    client: Client,
    config: MediaConfig,
    notifier: Arc<dyn Notifier>,
}

impl<H: HttpClient> MediaUploader<H> {
    pub fn new(
        api: AdminApi<H>,
        config: MediaConfig,
        notifier: Arc<dyn Notifier>,
    ) -> ClientResult<Self> {
        if config.upload_url.trim().is_empty() {
            return Err(ClientError::Config("Media upload URL is not set".into()));
        }
        if config.public_key.trim().is_empty() {
            return Err(ClientError::Config("Media public key is not set".into()));
        }
        let client = Client::builder().build()?;
        Ok(Self {
            api,
            client,
            config,
            notifier,
        })
    }

    pub fn config(&self) -> &MediaConfig {
        &self.config
    }

    /// Upload one file and return where the CDN stored it
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> ClientResult<UploadedMedia> {
        let result = self.send(file_name, bytes).await;
        match result {
            Ok(media) => {
                tracing::info!(file = %media.file_path, "Banner uploaded");
                self.notifier.success("Image uploaded");
                Ok(media)
            }
            Err(e) => Err(reject(self.notifier.as_ref(), e)),
        }
    }

    /// Upload and store the result in the form's banner field
    pub async fn upload_banner(
        &self,
        form: &mut RewardForm,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<UploadedMedia> {
        let media = self.upload(file_name, bytes).await?;
        form.apply_upload(&media);
        Ok(media)
    }

    async fn send(&self, file_name: &str, bytes: Vec<u8>) -> ClientResult<UploadedMedia> {
        if bytes.is_empty() {
            return Err(ClientError::Validation("Choose a non-empty file".into()));
        }

        let auth = self.api.media_auth().await?;
        if auth.expire <= chrono::Utc::now().timestamp() {
            tracing::warn!(expire = auth.expire, "Upload signature already expired");
        }

        let size = bytes.len();
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()))
            .text("fileName", file_name.to_string())
            .text("publicKey", self.config.public_key.clone())
            .text("signature", auth.signature)
            .text("expire", auth.expire.to_string())
            .text("token", auth.token)
            .text("folder", self.config.folder.clone());

        tracing::debug!(file_name, size, url = %self.config.upload_url, "Uploading banner");
        let response = self
            .client
            .post(&self.config.upload_url)
            .multipart(form)
            .send()
            .await?;
        handle_response(response).await
    }
}
