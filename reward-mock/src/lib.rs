//! reward-mock - in-memory reward service
//!
//! Implements the reward, category, content and media-signing endpoints
//! the admin client talks to, plus a local upload endpoint standing in for
//! the CDN. Spins are resolved on request (`POST /api/rewards/{id}/resolve`
//! or [`MockState::resolve_spin`]) or automatically after
//! [`Config::spin_delay`].
//!
//! Tests start it on an ephemeral port:
//!
//! ```no_run
//! # async fn demo() -> std::io::Result<()> {
//! let server = reward_mock::MockServer::start(reward_mock::Config::ephemeral()).await?;
//! println!("listening on {}", server.url());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod state;

pub use config::Config;
pub use state::{InjectedFailure, MockState, RecordedRequest};

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// A running mock service; stops when dropped
pub struct MockServer {
    addr: SocketAddr,
    state: Arc<MockState>,
    shutdown: CancellationToken,
}

impl MockServer {
    /// Bind and serve in a background task
    pub async fn start(config: Config) -> std::io::Result<Self> {
        let listener = TcpListener::bind(config.bind_addr()).await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(MockState::new(config));
        let app = api::router(state.clone());
        let shutdown = CancellationToken::new();

        let signal = shutdown.clone();
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(signal.cancelled_owned())
                .await
            {
                tracing::error!(error = %e, "Mock server error");
            }
        });

        tracing::debug!(%addr, "Mock server started");
        Ok(Self {
            addr,
            state,
            shutdown,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL, e.g. `http://127.0.0.1:40123`
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn state(&self) -> &Arc<MockState> {
        &self.state
    }

    pub fn stop(&self) {
        self.shutdown.cancel();
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
