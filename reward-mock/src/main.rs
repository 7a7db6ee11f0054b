use reward_mock::{Config, MockServer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reward_mock=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env();
    if let Some(delay) = config.spin_delay {
        info!(delay_ms = delay.as_millis() as u64, "Spins resolve automatically");
    }

    let server = MockServer::start(config).await?;
    info!(url = %server.url(), "reward-mock listening");

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    server.stop();
    Ok(())
}
