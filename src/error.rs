//! @acp:module "Errors"
//! @acp:summary "Library error enum and Result alias"
//! @acp:domain cli
//! @acp:layer model
//!
//! Library-wide error enum and `Result` alias. Command handlers wrap these
//! in `anyhow` at the CLI boundary.

use thiserror::Error;

/// Errors produced by the prompt and stats layers
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Unknown prompt key: {0}")]
    UnknownPromptKey(String),

    #[error("Unknown choice '{value}' for prompt {key}")]
    UnknownChoice { key: String, value: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

pub type Result<T> = std::result::Result<T, SetupError>;
