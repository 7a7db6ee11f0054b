use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;

mod commands;
mod console;
mod logger;

use commands::{CategoryAction, ContentAction, RewardAction};
use console::{ConsoleNotifier, PromptConfirm};
use reward_client::{AdminClient, ClientConfig, ClientError, ContentKind};

#[derive(Parser)]
#[command(name = "reward-admin")]
#[command(about = "Admin console for the reward and content service")]
#[command(version)]
struct Cli {
    /// Reward service base URL
    #[arg(long, env = "REWARD_API_URL", default_value = "http://localhost:5000", global = true)]
    api_url: String,

    /// Bearer token for the admin endpoints
    #[arg(long, env = "REWARD_API_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    yes: bool,

    /// Log level when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "warn", global = true)]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON", global = true)]
    log_json: bool,

    /// Also write logs to a daily rotating file in this directory
    #[arg(long, env = "LOG_DIR", global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage reward categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Manage reward sessions and run the wheel
    Rewards {
        #[command(subcommand)]
        action: RewardAction,
    },

    /// Manage posts, webinars, career pages and ads
    Content {
        /// post, webinar, career-page or ad
        kind: ContentKind,

        #[command(subcommand)]
        action: ContentAction,
    },

    /// Follow spin events as the public wheel sees them
    Watch {
        /// Poll interval in milliseconds
        #[arg(
            long,
            env = "SPIN_POLL_INTERVAL_MS",
            default_value_t = 2000,
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        interval_ms: u64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = logger::init_logger(&cli.log_level, cli.log_json, cli.log_dir.as_deref()) {
        eprintln!("Failed to initialize logging: {e:#}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        // Already reported as a toast
        Err(e) if e.downcast_ref::<ClientError>().is_some() => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ClientConfig::from_env();
    config.base_url = cli.api_url;
    if let Some(token) = cli.token {
        config.token = Some(token);
    }
    tracing::debug!(base_url = %config.base_url, "Using reward service");

    let client = AdminClient::from_config(&config, Arc::new(ConsoleNotifier))
        .map_err(|e| anyhow::anyhow!("Failed to set up the API client: {e}"))?;
    let confirm = PromptConfirm {
        assume_yes: cli.yes,
    };

    match cli.command {
        Commands::Categories { action } => commands::categories::run(&client, action, &confirm).await,
        Commands::Rewards { action } => {
            commands::rewards::run(&client, &config, action, &confirm).await
        }
        Commands::Content { kind, action } => {
            commands::content::run(&client, kind, action, &confirm).await
        }
        Commands::Watch { interval_ms } => {
            commands::watch::run(&client, std::time::Duration::from_millis(interval_ms)).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_interval_must_be_positive() {
        assert!(Cli::try_parse_from(["reward-admin", "watch", "--interval-ms", "0"]).is_err());

        let cli = Cli::try_parse_from(["reward-admin", "watch", "--interval-ms", "250"]).unwrap();
        assert!(matches!(cli.command, Commands::Watch { interval_ms: 250 }));
    }
}
