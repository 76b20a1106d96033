//! Application-wide error types.
//!
//! Backend and library modules return [`Error`] via the [`Result`] alias.
//! The binary entry point and CLI commands use `anyhow` for convenient
//! propagation. The UI maps errors to strings at the task boundary and shows
//! them as toasts.

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON library document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A library call was made before a server connection was established
    #[error("Not connected to a server")]
    NotConnected,

    /// Server rejected the credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Requested entity does not exist on the server
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Playback manager error
    #[error("Playback error: {0}")]
    Playback(String),

    /// Argument outside the range the server accepts
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Cover art could not be produced
    #[error("Image error: {0}")]
    Image(String),

    /// Missing file referenced by the library
    #[error("File not found: {0}")]
    MissingFile(PathBuf),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a not found error.
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create a playback error.
    pub fn playback(message: impl Into<String>) -> Self {
        Self::Playback(message.into())
    }

    /// Create an image error.
    pub fn image(message: impl Into<String>) -> Self {
        Self::Image(message.into())
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, serde_json::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Json(e).context(ctx))
    }
}
