//! The bot facade: registration surface, lifecycle, and direct sends.
//!
//! All mutators are callable at any time, including while polling runs; the
//! loop picks up registry changes no later than its next cycle. Hold the bot in
//! an `Arc` to share it between the host environment and shutdown handlers.

use std::sync::Arc;

use minibot_core::{BotError, Registry, Result, Transport};
use serde_json::json;
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::TelegramConfig;
use crate::poller::{Poller, PollerState, SharedState};
use crate::transport::TelegramTransport;

pub struct Bot {
    registry: Registry,
    welcome_message: Arc<RwLock<String>>,
    token: RwLock<String>,
    api_url: Option<String>,
    state: SharedState,
    cancel: Mutex<Option<CancellationToken>>,
    /// Injected transport for tests; production builds one from the token.
    transport_override: Option<Arc<dyn Transport>>,
    cached_transport: Mutex<Option<Arc<dyn Transport>>>,
}

impl Bot {
    /// Creates a bot from config. Nothing is polled until [`Bot::start`].
    pub fn new(config: TelegramConfig) -> Self {
        Self {
            registry: Registry::new(),
            welcome_message: Arc::new(RwLock::new(String::new())),
            token: RwLock::new(config.bot_token.trim().to_string()),
            api_url: config.api_url,
            state: Arc::new(RwLock::new(PollerState::default())),
            cancel: Mutex::new(None),
            transport_override: None,
            cached_transport: Mutex::new(None),
        }
    }

    /// Creates a bot over the given transport instead of a reqwest one.
    /// A token must still be set before [`Bot::start`].
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        let mut bot = Self::new(TelegramConfig::with_token(String::new()));
        bot.transport_override = Some(transport);
        bot
    }

    /// Sets (and trims) the bot token. An empty token leaves the bot
    /// unstartable and is logged, not an error.
    pub async fn set_token(&self, token: &str) {
        let token = token.trim();
        if token.is_empty() {
            warn!("empty bot token");
        } else {
            info!("bot token set");
        }
        *self.token.write().await = token.to_string();
        self.cached_transport.lock().await.take();
    }

    /// Sets the reply to `/start`. An empty message disables the welcome.
    pub async fn set_welcome_message(&self, text: &str) {
        *self.welcome_message.write().await = text.to_string();
    }

    pub async fn add_command(&self, trigger: &str, reply_text: &str) {
        self.registry.set_command(trigger, reply_text).await;
    }

    pub async fn create_menu(&self, trigger: &str) {
        self.registry.ensure_menu(trigger).await;
    }

    pub async fn add_button_to_menu(&self, trigger: &str, label: &str, id: &str) {
        self.registry.add_button(trigger, label, id).await;
    }

    pub async fn set_button_handler(&self, id: &str, reply_text: &str) {
        self.registry.set_button_handler(id, reply_text).await;
    }

    /// Sends a message directly, bypassing dispatch. HTML parse mode, matching
    /// the manual-send path of the API.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        let transport = self.transport().await?;
        transport
            .post(
                "sendMessage",
                json!({ "chat_id": chat_id, "text": text, "parse_mode": "HTML" }),
            )
            .await?;
        info!(chat_id, "message sent");
        Ok(())
    }

    /// Starts polling. No-op when already running; an unset token is a
    /// configuration error surfaced to the caller, never fatal to the process.
    pub async fn start(&self) -> Result<()> {
        if self.token.read().await.is_empty() {
            warn!("cannot start: bot token is not set");
            return Err(BotError::Config("bot token is not set".to_string()));
        }

        {
            let mut state = self.state.write().await;
            if state.running {
                info!("bot already running");
                return Ok(());
            }
            state.running = true;
        }

        let transport = match self.transport().await {
            Ok(transport) => transport,
            Err(err) => {
                self.state.write().await.running = false;
                return Err(err);
            }
        };

        let cancel = CancellationToken::new();
        *self.cancel.lock().await = Some(cancel.clone());

        let poller = Poller::new(
            transport,
            self.registry.clone(),
            self.welcome_message.clone(),
            self.state.clone(),
            cancel,
        );
        tokio::spawn(poller.run());
        info!("bot started");
        Ok(())
    }

    /// Requests a stop. Takes effect before the next poll cycle; the in-flight
    /// cycle finishes normally.
    pub async fn stop(&self) {
        let was_running = {
            let mut state = self.state.write().await;
            std::mem::replace(&mut state.running, false)
        };
        if let Some(cancel) = self.cancel.lock().await.take() {
            cancel.cancel();
        }
        if was_running {
            info!("bot stopped");
        } else {
            info!("bot is not running");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.state.read().await.running
    }

    /// Text of the most recent inbound message, or `""` before any arrived.
    pub async fn last_message_text(&self) -> String {
        self.state.read().await.last_message_text.clone()
    }

    /// Chat id of the most recent inbound message, or `""` before any arrived.
    pub async fn last_chat_id(&self) -> String {
        self.state.read().await.last_chat_id.clone()
    }

    /// Returns the injected transport, or builds (and caches) a reqwest one
    /// from the current token.
    async fn transport(&self) -> Result<Arc<dyn Transport>> {
        if let Some(transport) = &self.transport_override {
            return Ok(transport.clone());
        }

        let token = self.token.read().await.clone();
        if token.is_empty() {
            return Err(BotError::Config("bot token is not set".to_string()));
        }

        let mut cached = self.cached_transport.lock().await;
        if let Some(transport) = cached.as_ref() {
            return Ok(transport.clone());
        }
        let transport: Arc<dyn Transport> =
            Arc::new(TelegramTransport::new(&token, self.api_url.as_deref())?);
        *cached = Some(transport.clone());
        Ok(transport)
    }
}
