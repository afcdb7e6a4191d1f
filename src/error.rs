//! Unified error types for the superhero registry.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for startup and CLI commands.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Record store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised by the hero document and the record operations over it.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The document could not be read or written.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// Path of the document (or its temporary sibling).
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The document is not a valid JSON array of heroes.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// Path of the document.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The heroes could not be serialized for writing.
    #[error("failed to serialize heroes for {}: {source}", path.display())]
    Serialize {
        /// Path of the document being written.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// No hero matches the given key.
    #[error("hero {name}/{universe} not found")]
    NotFound {
        /// Hero name searched for.
        name: String,
        /// Universe searched for.
        universe: String,
    },

    /// Another hero already holds the key.
    #[error("hero {name}/{universe} already exists")]
    DuplicateKey {
        /// Conflicting hero name.
        name: String,
        /// Conflicting universe.
        universe: String,
    },
}

impl StoreError {
    /// True when the document file does not exist yet.
    pub fn is_missing_document(&self) -> bool {
        matches!(self, StoreError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
