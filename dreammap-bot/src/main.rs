//! `dreammap` binary.

use anyhow::{bail, Result};
use clap::Parser;
use dreammap_bot::{run_bot, run_checks, set_premium, BotConfig, Cli, Commands};
use dreammap_core::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let log_file = std::env::var("LOG_FILE").ok().filter(|s| !s.is_empty());
    init_tracing(log_file.as_deref())?;

    let config_file = cli.config.as_deref();
    match cli.command() {
        Commands::Run { token } => {
            let config = BotConfig::load(token, config_file)?;
            run_bot(config).await
        }
        Commands::Check { token } => {
            let report = run_checks(token, config_file).await;
            print!("{report}");
            if !report.passed() {
                bail!("Preflight check failed");
            }
            Ok(())
        }
        Commands::Premium { tg_user_id, revoke } => {
            let database_path = BotConfig::database_path(config_file)?;
            set_premium(&database_path, tg_user_id, !revoke).await
        }
    }
}
