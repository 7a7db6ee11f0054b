//! Client configuration

use std::time::Duration;

use crate::error::ClientResult;
use crate::http::NetworkHttpClient;

/// Default ImageKit upload endpoint
pub const DEFAULT_UPLOAD_URL: &str = "https://upload.imagekit.io/api/v1/files/upload";

/// Media CDN settings for banner uploads
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Multipart upload endpoint of the CDN
    pub upload_url: String,
    /// Public key sent alongside the server-issued signature
    pub public_key: String,
    /// Destination folder on the CDN
    pub folder: String,
}

impl MediaConfig {
    pub fn new(upload_url: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            upload_url: upload_url.into(),
            public_key: public_key.into(),
            folder: "/rewards".to_string(),
        }
    }

    /// Set the destination folder
    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }
}

/// Client configuration for connecting to the reward service
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | REWARD_API_URL | http://localhost:5000 | Service base URL |
/// | REWARD_API_TOKEN | (none) | Bearer token for admin endpoints |
/// | REWARD_API_TIMEOUT_SECS | 30 | Per-request timeout |
/// | IMAGEKIT_UPLOAD_URL | ImageKit upload API | Media upload endpoint |
/// | IMAGEKIT_PUBLIC_KEY | (empty) | Media public key |
/// | IMAGEKIT_FOLDER | /rewards | Upload folder |
/// | SPIN_POLL_INTERVAL_MS | 2000 | Spin watcher poll interval |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Media CDN settings
    pub media: MediaConfig,

    /// Spin watcher poll interval in milliseconds
    pub poll_interval_ms: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            media: MediaConfig::new(DEFAULT_UPLOAD_URL, ""),
            poll_interval_ms: 2000,
        }
    }

    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("REWARD_API_URL").unwrap_or_else(|_| "http://localhost:5000".into());
        let mut config = Self::new(base_url);

        config.token = std::env::var("REWARD_API_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());
        config.timeout = std::env::var("REWARD_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        config.poll_interval_ms = std::env::var("SPIN_POLL_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&ms| ms > 0)
            .unwrap_or(2000);
        config.media = MediaConfig::new(
            std::env::var("IMAGEKIT_UPLOAD_URL").unwrap_or_else(|_| DEFAULT_UPLOAD_URL.into()),
            std::env::var("IMAGEKIT_PUBLIC_KEY").unwrap_or_default(),
        )
        .with_folder(std::env::var("IMAGEKIT_FOLDER").unwrap_or_else(|_| "/rewards".into()));

        config
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the media CDN settings
    pub fn with_media(mut self, media: MediaConfig) -> Self {
        self.media = media;
        self
    }

    /// Set the spin watcher poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        let client = NetworkHttpClient::with_timeout(&self.base_url, Duration::from_secs(self.timeout))?;
        Ok(match &self.token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpClient;

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new("http://rewards.local")
            .with_token("secret")
            .with_timeout(5)
            .with_poll_interval(Duration::from_millis(250));
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.timeout, 5);
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.media.folder, "/rewards");
    }

    #[test]
    fn test_build_http_client_keeps_token() {
        let client = ClientConfig::new("http://rewards.local/")
            .with_token("secret")
            .build_http_client()
            .unwrap();
        assert_eq!(client.token(), Some("secret"));
        assert_eq!(client.base_url(), "http://rewards.local");
    }
}
