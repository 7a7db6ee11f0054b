use std::time::Duration;

/// reward-mock 配置，从环境变量读取
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | MOCK_HOST | 127.0.0.1 | Bind address |
/// | MOCK_PORT | 5000 | Bind port (0 = any free port) |
/// | MOCK_ADMIN_TOKEN | (none) | Bearer token required on every request |
/// | MOCK_SPIN_DELAY_MS | (none) | Resolve triggered spins after this delay |
/// | MOCK_MEDIA_PUBLIC_KEY | public_mock_key | Public key accepted by the upload endpoint |
/// | MOCK_SEED | false | Start with demo categories, rewards and posts |
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// When set, requests without `Authorization: Bearer <token>` get 401
    pub admin_token: Option<String>,
    /// When set, a triggered spin resolves on its own after this delay
    pub spin_delay: Option<Duration>,
    pub media_public_key: String,
    pub seed: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("MOCK_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("MOCK_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            admin_token: std::env::var("MOCK_ADMIN_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            spin_delay: std::env::var("MOCK_SPIN_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis),
            media_public_key: std::env::var("MOCK_MEDIA_PUBLIC_KEY")
                .unwrap_or_else(|_| "public_mock_key".to_string()),
            seed: std::env::var("MOCK_SEED")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    /// Config for tests: loopback, any free port, manual spin resolution
    pub fn ephemeral() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            admin_token: None,
            spin_delay: None,
            media_public_key: "public_mock_key".to_string(),
            seed: false,
        }
    }

    pub fn with_spin_delay(mut self, delay: Duration) -> Self {
        self.spin_delay = Some(delay);
        self
    }

    pub fn with_admin_token(mut self, token: impl Into<String>) -> Self {
        self.admin_token = Some(token.into());
        self
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::ephemeral()
    }
}
