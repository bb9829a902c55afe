//! Error types for pagesync-model

/// Result type for pagesync-model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building model values
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A date string was neither `YYYY-MM-DD` nor RFC 3339
    #[error("Invalid date value: {value}")]
    InvalidDate { value: String },
}
