//! Minimal bot config: token, API base URL, log path.
//! Loaded from the environment: BOT_TOKEN, TELEGRAM_API_URL, LOG_FILE.

use anyhow::Result;
use std::env;

/// Connectivity config (Telegram access and logging only).
pub struct TelegramConfig {
    pub bot_token: String,
    /// API base override, e.g. a local Bot API server. Defaults to the public one.
    pub api_url: Option<String>,
    pub log_file: Option<String>,
}

impl TelegramConfig {
    /// Loads from environment variables: BOT_TOKEN required, the rest optional.
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?;
        let api_url = env::var("TELEGRAM_API_URL").ok();
        let log_file = env::var("LOG_FILE").ok();
        Ok(Self {
            bot_token,
            api_url,
            log_file,
        })
    }

    /// Constructs from a token alone, the rest as None.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            api_url: None,
            log_file: None,
        }
    }
}
