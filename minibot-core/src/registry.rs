//! Registry of commands, menus, and button handlers.
//!
//! Shared between the registration surface and the poll loop: [`Registry`] is a
//! cheap clone over one locked store. Reads from the dispatch path take a
//! [`RegistrySnapshot`] so routing stays a pure function over immutable data.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::types::Button;

/// Normalizes a trigger to the `/command` form used as a lookup key.
/// `"help"` and `"/help"` map to the same key; an empty trigger becomes `"/"`.
pub fn normalize_trigger(raw: &str) -> String {
    if raw.starts_with('/') {
        raw.to_string()
    } else {
        format!("/{raw}")
    }
}

#[derive(Default)]
struct RegistryInner {
    commands: HashMap<String, String>,
    menus: HashMap<String, Vec<Button>>,
    button_handlers: HashMap<String, String>,
}

/// Mutable registry behind a lock. All writes normalize triggers and overwrite
/// wholesale; entries live for the process lifetime (no deletion API).
#[derive(Clone, Default)]
pub struct Registry {
    inner: Arc<RwLock<RegistryInner>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores (or overwrites) the reply text for a command trigger.
    pub async fn set_command(&self, trigger: &str, reply_text: &str) {
        let key = normalize_trigger(trigger);
        self.inner
            .write()
            .await
            .commands
            .insert(key.clone(), reply_text.to_string());
        debug!(trigger = %key, "command registered");
    }

    /// Creates an empty menu for the trigger if none exists. No-op when present,
    /// so it can be called before or interleaved with [`Registry::add_button`].
    pub async fn ensure_menu(&self, trigger: &str) {
        let key = normalize_trigger(trigger);
        self.inner.write().await.menus.entry(key.clone()).or_default();
        debug!(trigger = %key, "menu ensured");
    }

    /// Appends a button to the trigger's menu, creating the menu if missing.
    /// No de-duplication: repeated ids produce repeated buttons.
    pub async fn add_button(&self, trigger: &str, label: &str, id: &str) {
        let key = normalize_trigger(trigger);
        self.inner
            .write()
            .await
            .menus
            .entry(key.clone())
            .or_default()
            .push(Button::new(label, id));
        debug!(trigger = %key, button_id = id, "button appended");
    }

    /// Stores (or overwrites) the reply text for a button id. Ids are exact;
    /// no normalization.
    pub async fn set_button_handler(&self, id: &str, reply_text: &str) {
        self.inner
            .write()
            .await
            .button_handlers
            .insert(id.to_string(), reply_text.to_string());
        debug!(button_id = id, "button handler set");
    }

    pub async fn lookup_command(&self, trigger: &str) -> Option<String> {
        let key = normalize_trigger(trigger);
        self.inner.read().await.commands.get(&key).cloned()
    }

    pub async fn lookup_menu(&self, trigger: &str) -> Option<Vec<Button>> {
        let key = normalize_trigger(trigger);
        self.inner.read().await.menus.get(&key).cloned()
    }

    pub async fn lookup_button_handler(&self, id: &str) -> Option<String> {
        self.inner.read().await.button_handlers.get(id).cloned()
    }

    /// Clones the current contents into an immutable snapshot for dispatch.
    pub async fn snapshot(&self) -> RegistrySnapshot {
        let inner = self.inner.read().await;
        RegistrySnapshot {
            commands: inner.commands.clone(),
            menus: inner.menus.clone(),
            button_handlers: inner.button_handlers.clone(),
        }
    }
}

/// Point-in-time copy of the registry used by the dispatcher. Lookups here take
/// already-normalized keys (inbound message text arrives in `/command` form).
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    commands: HashMap<String, String>,
    menus: HashMap<String, Vec<Button>>,
    button_handlers: HashMap<String, String>,
}

impl RegistrySnapshot {
    pub fn command(&self, trigger: &str) -> Option<&str> {
        self.commands.get(trigger).map(String::as_str)
    }

    pub fn menu(&self, trigger: &str) -> Option<&[Button]> {
        self.menus.get(trigger).map(Vec::as_slice)
    }

    pub fn button_handler(&self, id: &str) -> Option<&str> {
        self.button_handlers.get(id).map(String::as_str)
    }
}
