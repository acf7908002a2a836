//! CLI parser.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dreammap")]
#[command(about = "DreamMap: Telegram dream journal with Gemini analysis", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON config file (default: ./config.json when present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the Telegram bot (default).
    Run {
        /// Overrides TELEGRAM_BOT_TOKEN.
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Check configuration and storage; exits non-zero when a required item fails.
    Check {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Grant (or revoke) premium for a Telegram user id.
    Premium {
        tg_user_id: i64,
        #[arg(long)]
        revoke: bool,
    },
}

impl Cli {
    /// The subcommand, `run` when none was given.
    pub fn command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Run { token: None })
    }
}
