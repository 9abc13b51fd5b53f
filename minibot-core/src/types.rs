//! Core types: inline-keyboard button, inbound events, outbound actions.

use serde::{Deserialize, Serialize};

/// One inline-keyboard button. Serializes to the Telegram wire shape
/// (`text` / `callback_data`) so menus can be embedded into `reply_markup` as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    /// Visible button caption.
    #[serde(rename = "text")]
    pub label: String,
    /// Callback payload delivered back when the button is pressed.
    #[serde(rename = "callback_data")]
    pub id: String,
}

impl Button {
    pub fn new(label: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            id: id.into(),
        }
    }
}

/// One decoded element of a `getUpdates` batch. Exactly one variant per update;
/// `update_id` always drives cursor advancement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// A plain chat message.
    Message {
        chat_id: i64,
        text: String,
        update_id: i64,
    },
    /// A button press on a previously sent inline keyboard.
    CallbackQuery {
        /// Acknowledgment token for `answerCallbackQuery`.
        id: String,
        chat_id: i64,
        button_id: String,
        update_id: i64,
    },
}

impl InboundEvent {
    /// The update id of this event, whatever the variant.
    pub fn update_id(&self) -> i64 {
        match self {
            Self::Message { update_id, .. } => *update_id,
            Self::CallbackQuery { update_id, .. } => *update_id,
        }
    }
}

/// One outbound call the dispatcher decided on. Executed in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundAction {
    /// `sendMessage` with plain text.
    SendText { chat_id: i64, text: String },
    /// `sendMessage` with an attached inline keyboard, already partitioned into rows.
    SendMenu {
        chat_id: i64,
        prompt: String,
        rows: Vec<Vec<Button>>,
    },
    /// `answerCallbackQuery` for the given acknowledgment token.
    AckCallback { callback_id: String },
}
