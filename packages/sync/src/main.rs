// Main entry point for the campaign sync

use std::time::Duration;

use anyhow::{Context, Result};
use campaign_sync_core::kernel::{CycleRunner, CycleRunnerConfig, SyncDeps};
use campaign_sync_core::Config;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "campaign-sync")]
#[command(about = "Sync LinkedIn post commenters and likers into Airtable, lemlist and HubSpot")]
struct Cli {
    /// Run one cycle and exit
    #[arg(long)]
    once: bool,

    /// Minutes to sleep between cycles when not running once
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    interval_minutes: u64,
}

/// Sleep between cycles, saturating instead of overflowing on huge values.
fn interval_from_minutes(minutes: u64) -> Duration {
    Duration::from_secs(minutes.saturating_mul(60))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,campaign_sync_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(mode = ?config.run_mode(), "Configuration loaded");

    let deps = SyncDeps::from_config(&config);
    let runner = CycleRunner::with_config(
        deps,
        CycleRunnerConfig {
            pacing_delay: config.pacing_delay,
            interval: interval_from_minutes(cli.interval_minutes),
            once: cli.once,
        },
    );

    runner.run_until_shutdown().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_from_minutes() {
        assert_eq!(interval_from_minutes(60), Duration::from_secs(3600));
        assert_eq!(interval_from_minutes(u64::MAX), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_cli_accepts_huge_interval() {
        let max = u64::MAX.to_string();
        let cli =
            Cli::try_parse_from(["campaign-sync", "--interval-minutes", max.as_str()]).unwrap();
        assert_eq!(
            interval_from_minutes(cli.interval_minutes),
            Duration::from_secs(u64::MAX)
        );
        assert!(Cli::try_parse_from(["campaign-sync", "--interval-minutes", "0"]).is_err());
    }
}
