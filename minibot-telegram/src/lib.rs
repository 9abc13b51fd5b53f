//! # minibot-telegram
//!
//! Telegram connectivity for the long-polling bot: the reqwest [`Transport`]
//! implementation, raw-update decoding, the [`Poller`] loop, and the [`Bot`]
//! registration facade. Handles only Telegram plumbing; routing lives in
//! minibot-core.
//!
//! [`Transport`]: minibot_core::Transport

mod bot;
mod config;
mod poller;
mod transport;
mod update;

pub use bot::Bot;
pub use config::TelegramConfig;
pub use poller::{Poller, PollerState, SharedState};
pub use transport::{TelegramTransport, TELEGRAM_API_BASE};
pub use update::{decode_update, extract_update_id};
