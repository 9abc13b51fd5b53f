//! Decoding of raw `getUpdates` elements into [`InboundEvent`]s.
//!
//! Only the fields the dispatcher reads are modeled; everything else in an
//! update is ignored. An update carrying neither a message nor a callback
//! query decodes to `None` (skipped by the poller, cursor still advances).

use minibot_core::{BotError, InboundEvent, Result};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct RawUpdate {
    update_id: i64,
    #[serde(default)]
    message: Option<RawMessage>,
    #[serde(default)]
    callback_query: Option<RawCallbackQuery>,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    chat: RawChat,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawChat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct RawCallbackQuery {
    id: String,
    #[serde(default)]
    data: Option<String>,
    #[serde(default)]
    message: Option<RawMessage>,
}

/// Extracts the update id without decoding the rest. The poller advances the
/// cursor on this alone, even for updates it cannot otherwise decode.
pub fn extract_update_id(raw: &Value) -> Option<i64> {
    raw.get("update_id").and_then(Value::as_i64)
}

/// Decodes one raw update. A message without `text` becomes an empty-text
/// message; a callback query missing its payload or origin chat is malformed.
pub fn decode_update(raw: &Value) -> Result<Option<InboundEvent>> {
    let update: RawUpdate =
        serde_json::from_value(raw.clone()).map_err(|e| BotError::Payload(e.to_string()))?;

    if let Some(message) = update.message {
        return Ok(Some(InboundEvent::Message {
            chat_id: message.chat.id,
            text: message.text.unwrap_or_default(),
            update_id: update.update_id,
        }));
    }

    if let Some(query) = update.callback_query {
        let button_id = query
            .data
            .ok_or_else(|| BotError::Payload("callback_query without data".to_string()))?;
        let chat_id = query
            .message
            .ok_or_else(|| BotError::Payload("callback_query without message".to_string()))?
            .chat
            .id;
        return Ok(Some(InboundEvent::CallbackQuery {
            id: query.id,
            chat_id,
            button_id,
            update_id: update.update_id,
        }));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_message() {
        let raw = json!({
            "update_id": 7,
            "message": { "chat": { "id": 42 }, "text": "/help" }
        });
        assert_eq!(
            decode_update(&raw).unwrap(),
            Some(InboundEvent::Message {
                chat_id: 42,
                text: "/help".to_string(),
                update_id: 7,
            })
        );
    }

    #[test]
    fn test_decode_message_without_text() {
        let raw = json!({
            "update_id": 8,
            "message": { "chat": { "id": 42 } }
        });
        assert_eq!(
            decode_update(&raw).unwrap(),
            Some(InboundEvent::Message {
                chat_id: 42,
                text: String::new(),
                update_id: 8,
            })
        );
    }

    #[test]
    fn test_decode_callback_query() {
        let raw = json!({
            "update_id": 9,
            "callback_query": {
                "id": "cb1",
                "data": "button1",
                "message": { "chat": { "id": 42 } }
            }
        });
        assert_eq!(
            decode_update(&raw).unwrap(),
            Some(InboundEvent::CallbackQuery {
                id: "cb1".to_string(),
                chat_id: 42,
                button_id: "button1".to_string(),
                update_id: 9,
            })
        );
    }

    #[test]
    fn test_decode_unknown_update_kind() {
        let raw = json!({ "update_id": 10, "edited_message": { "x": 1 } });
        assert_eq!(decode_update(&raw).unwrap(), None);
    }

    #[test]
    fn test_decode_callback_without_data_is_malformed() {
        let raw = json!({
            "update_id": 11,
            "callback_query": { "id": "cb1", "message": { "chat": { "id": 42 } } }
        });
        assert!(decode_update(&raw).is_err());
    }

    #[test]
    fn test_missing_update_id_is_malformed() {
        let raw = json!({ "message": { "chat": { "id": 42 }, "text": "hi" } });
        assert!(extract_update_id(&raw).is_none());
        assert!(decode_update(&raw).is_err());
    }
}
