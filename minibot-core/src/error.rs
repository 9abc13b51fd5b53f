use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Malformed payload: {0}")]
    Payload(String),
}

/// Failure of one remote call. Network problems, non-2xx statuses, `ok=false`
/// API envelopes and undecodable bodies are all kept apart so the poller can log
/// them distinctly; none of them is fatal to the loop.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("API error: {0}")]
    Api(String),

    #[error("Response decode failed: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, BotError>;
