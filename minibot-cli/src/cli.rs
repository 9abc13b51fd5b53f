//! CLI parser and config loading.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use minibot_telegram::TelegramConfig;

#[derive(Parser)]
#[command(name = "minibot")]
#[command(about = "Long-polling Telegram bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,

        /// Reply to /start messages.
        #[arg(short, long)]
        welcome: Option<String>,

        /// Static command, as trigger=reply. Repeatable.
        #[arg(short, long = "command", value_name = "TRIGGER=REPLY")]
        commands: Vec<String>,
    },
}

/// Loads TelegramConfig from environment. If `token` is provided it overrides
/// BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<TelegramConfig> {
    match token {
        Some(token) => {
            let mut config = TelegramConfig::with_token(token);
            config.api_url = std::env::var("TELEGRAM_API_URL").ok();
            config.log_file = std::env::var("LOG_FILE").ok();
            Ok(config)
        }
        None => TelegramConfig::from_env(),
    }
}

/// Splits a `trigger=reply` argument.
pub fn parse_command_arg(raw: &str) -> Result<(&str, &str)> {
    raw.split_once('=')
        .ok_or_else(|| anyhow!("invalid --command '{raw}', expected TRIGGER=REPLY"))
}
