//! Routing: one inbound event and a registry snapshot in, outbound actions out.
//!
//! Pure and deterministic; no I/O, no registry mutation. Message rules are
//! independent guards, not an if/else chain: a single message may legitimately
//! produce a welcome reply, a command reply, and a menu all at once.

use crate::registry::RegistrySnapshot;
use crate::types::{Button, InboundEvent, OutboundAction};

/// Prompt text sent above every inline menu.
pub const MENU_PROMPT: &str = "Выберите действие:";

/// Maximum buttons per keyboard row.
const ROW_WIDTH: usize = 2;

/// Decides the outbound actions for one event. Actions are returned in the
/// order they must be executed.
pub fn route(
    event: &InboundEvent,
    registry: &RegistrySnapshot,
    welcome_message: &str,
) -> Vec<OutboundAction> {
    let mut actions = Vec::new();

    match event {
        InboundEvent::Message { chat_id, text, .. } => {
            if text == "/start" && !welcome_message.is_empty() {
                actions.push(OutboundAction::SendText {
                    chat_id: *chat_id,
                    text: welcome_message.to_string(),
                });
            }

            if let Some(reply) = registry.command(text) {
                actions.push(OutboundAction::SendText {
                    chat_id: *chat_id,
                    text: reply.to_string(),
                });
            }

            if let Some(buttons) = registry.menu(text) {
                if !buttons.is_empty() {
                    actions.push(OutboundAction::SendMenu {
                        chat_id: *chat_id,
                        prompt: MENU_PROMPT.to_string(),
                        rows: partition_rows(buttons),
                    });
                }
            }
        }
        InboundEvent::CallbackQuery {
            id,
            chat_id,
            button_id,
            ..
        } => {
            if let Some(reply) = registry.button_handler(button_id) {
                actions.push(OutboundAction::SendText {
                    chat_id: *chat_id,
                    text: reply.to_string(),
                });
            }
            // The press is acknowledged last and unconditionally, handler or not.
            actions.push(OutboundAction::AckCallback {
                callback_id: id.clone(),
            });
        }
    }

    actions
}

/// Splits a button sequence into keyboard rows of at most two buttons,
/// preserving the original order.
pub fn partition_rows(buttons: &[Button]) -> Vec<Vec<Button>> {
    buttons.chunks(ROW_WIDTH).map(|row| row.to_vec()).collect()
}
