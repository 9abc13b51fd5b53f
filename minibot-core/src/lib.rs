//! # minibot-core
//!
//! Core of the long-polling bot: event and action types, the command/menu/handler
//! [`Registry`], the pure [`dispatcher`], the [`Transport`] seam, error taxonomy,
//! and tracing initialization. Transport-agnostic; used by minibot-telegram.

pub mod dispatcher;
pub mod error;
pub mod logger;
pub mod registry;
pub mod transport;
pub mod types;

pub use dispatcher::{partition_rows, route, MENU_PROMPT};
pub use error::{BotError, Result, TransportError};
pub use logger::init_tracing;
pub use registry::{normalize_trigger, Registry, RegistrySnapshot};
pub use transport::Transport;
pub use types::{Button, InboundEvent, OutboundAction};
