//! The long-poll loop: fetch a batch, dispatch each update, advance the cursor.
//!
//! One cycle at a time; no second `getUpdates` is issued while a batch's actions
//! are still executing. Every error inside the loop is caught at the cycle
//! boundary, so no single failure ever ends polling. Cancellation is observed
//! only at the top of an iteration: stopping lets the in-flight cycle finish.

use std::sync::Arc;
use std::time::Duration;

use minibot_core::{dispatcher, InboundEvent, OutboundAction, Registry, Transport};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Pause between poll cycles.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Long-poll timeout passed to `getUpdates`, in seconds.
const FETCH_TIMEOUT_SECS: u64 = 30;

/// Runtime state shared between the loop and the registration surface.
/// `offset` is the exclusive lower bound of not-yet-fetched updates and never
/// decreases; the `last_*` fields mirror the most recent inbound message.
#[derive(Debug, Default)]
pub struct PollerState {
    pub running: bool,
    pub offset: i64,
    pub last_message_text: String,
    pub last_chat_id: String,
}

pub type SharedState = Arc<RwLock<PollerState>>;

/// Owns one polling run. Constructed per `start()`; dropped when the loop exits.
pub struct Poller {
    transport: Arc<dyn Transport>,
    registry: Registry,
    welcome_message: Arc<RwLock<String>>,
    state: SharedState,
    cancel: CancellationToken,
}

impl Poller {
    pub fn new(
        transport: Arc<dyn Transport>,
        registry: Registry,
        welcome_message: Arc<RwLock<String>>,
        state: SharedState,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            transport,
            registry,
            welcome_message,
            state,
            cancel,
        }
    }

    /// Runs fetch-process-sleep cycles until cancelled. The `running` flag is
    /// not touched here: `stop()` owns that transition, and a loop outliving
    /// its own cancellation must not clobber the state of a restarted one.
    pub async fn run(self) {
        info!("polling started");
        loop {
            if self.cancel.is_cancelled() {
                break;
            }
            self.cycle().await;
            tokio::time::sleep(POLL_INTERVAL).await;
        }
        info!("polling stopped");
    }

    /// One fetch-process cycle. A fetch failure leaves the cursor unchanged so
    /// the same window is retried next cycle.
    async fn cycle(&self) {
        let offset = self.state.read().await.offset;
        let params = [
            ("offset", offset.to_string()),
            ("timeout", FETCH_TIMEOUT_SECS.to_string()),
        ];
        match self.transport.fetch("getUpdates", &params).await {
            Ok(payload) => self.process_batch(&payload).await,
            Err(err) => warn!(offset, error = %err, "getUpdates failed, will retry"),
        }
    }

    /// Processes one `getUpdates` body. A batch whose `result` is not a list is
    /// dropped whole and retried; an update without an id drops the rest of the
    /// batch; an undecodable update with an id is skipped but still advances
    /// the cursor.
    async fn process_batch(&self, payload: &Value) {
        let Some(updates) = payload.get("result").and_then(Value::as_array) else {
            warn!("getUpdates payload has no result list, dropping batch");
            return;
        };
        if updates.is_empty() {
            return;
        }

        let snapshot = self.registry.snapshot().await;
        let welcome_message = self.welcome_message.read().await.clone();

        for raw in updates {
            let Some(update_id) = crate::update::extract_update_id(raw) else {
                warn!("update without update_id, dropping batch for retry");
                return;
            };

            match crate::update::decode_update(raw) {
                Ok(Some(event)) => {
                    self.record_last_message(&event).await;
                    let actions = dispatcher::route(&event, &snapshot, &welcome_message);
                    debug!(update_id, action_count = actions.len(), "update dispatched");
                    for action in actions {
                        self.execute(action).await;
                    }
                }
                Ok(None) => debug!(update_id, "update carries no message or callback, skipped"),
                Err(err) => warn!(update_id, error = %err, "undecodable update skipped"),
            }

            self.advance_cursor(update_id).await;
        }
    }

    /// Mirrors the latest inbound message into the shared state (observability
    /// side-channel; not used for routing).
    async fn record_last_message(&self, event: &InboundEvent) {
        if let InboundEvent::Message { chat_id, text, .. } = event {
            let mut state = self.state.write().await;
            state.last_message_text = text.clone();
            state.last_chat_id = chat_id.to_string();
        }
    }

    async fn advance_cursor(&self, update_id: i64) {
        let mut state = self.state.write().await;
        state.offset = state.offset.max(update_id.saturating_add(1));
    }

    /// Executes one outbound action, best-effort: a failure is logged and does
    /// not block sibling actions or the cursor advance.
    async fn execute(&self, action: OutboundAction) {
        let result = match &action {
            OutboundAction::SendText { chat_id, text } => {
                self.transport
                    .post("sendMessage", json!({ "chat_id": chat_id, "text": text }))
                    .await
            }
            OutboundAction::SendMenu {
                chat_id,
                prompt,
                rows,
            } => {
                self.transport
                    .post(
                        "sendMessage",
                        json!({
                            "chat_id": chat_id,
                            "text": prompt,
                            "reply_markup": { "inline_keyboard": rows },
                        }),
                    )
                    .await
            }
            OutboundAction::AckCallback { callback_id } => {
                self.transport
                    .post(
                        "answerCallbackQuery",
                        json!({ "callback_query_id": callback_id }),
                    )
                    .await
            }
        };

        if let Err(err) = result {
            warn!(error = %err, action = ?action, "outbound action failed");
        }
    }
}
