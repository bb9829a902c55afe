//! Error types for pagesync-core

use std::path::PathBuf;

use crate::compare::Incomparable;

/// Result type for pagesync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reconciling records
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A synchronize request was submitted without a matcher
    #[error("Synchronize request has no matcher")]
    MissingMatcher,

    /// A desired property cannot be compared with the stored one
    #[error("Cannot compare property {key}: {source}")]
    UnsupportedComparison {
        key: String,
        #[source]
        source: Incomparable,
    },

    /// The digest property holds something other than text
    #[error("Digest property {key} holds a {found} value, expected rich text")]
    DigestPropertyType { key: String, found: &'static str },

    /// Configuration file not found at expected path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration parsed but holds unusable values
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Error from the record store
    #[error(transparent)]
    Store(#[from] pagesync_store::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}
