//! Error types for the site service.
//!
//! The taxonomy is deliberately flat: every widget-facing boundary collapses
//! errors to a fixed human-readable sentence, so these enums exist to give
//! the collapse points something typed to log and to keep internal plumbing
//! on `Result` + `?`.

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Generation error: {0}")]
    Llm(#[from] LlmError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}. {hint}")]
    MissingRequired { key: String, hint: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Hosted generation endpoint errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Generation request failed: {0}")]
    RequestFailed(String),

    #[error("Generation endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from generation endpoint: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Hosted data store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store request failed: {0}")]
    RequestFailed(String),

    #[error("Store returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Hosted auth errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Auth request failed: {0}")]
    RequestFailed(String),

    #[error("Authentication rejected: {0}")]
    Rejected(String),

    #[error("Session invalid or expired")]
    InvalidSession,
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
