//! Application-wide error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("storage error: {0}")]
    Storage(String),

    /// The slot exists but its contents cannot be read as text.
    #[error("corrupt slot: {0}")]
    CorruptSlot(String),

    #[error("key generation error: {0}")]
    KeyGen(String),

    #[error("identity error: {0}")]
    Identity(String),

    #[error("clipboard error: {0}")]
    Clipboard(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
