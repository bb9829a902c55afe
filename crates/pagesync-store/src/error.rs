//! Error types for pagesync-store

/// Result type for store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by a record store
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Record or block does not exist
    #[error("Not found: {id}")]
    NotFound { id: String },

    /// The caller cancelled the operation
    #[error("Operation cancelled")]
    Cancelled,

    /// The caller's deadline passed before the operation ran
    #[error("Deadline exceeded")]
    DeadlineExceeded,

    /// The store refused the operation (network, auth, rate limit, validation)
    #[error("{operation} rejected: {message}")]
    Rejected { operation: String, message: String },

    /// Internal store state is unusable after a panic in another thread
    #[error("Store state poisoned")]
    Poisoned,
}

impl Error {
    pub fn rejected(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_display_names_operation() {
        let err = Error::rejected("update_record", "rate limited");
        let display = err.to_string();
        assert!(display.contains("update_record"));
        assert!(display.contains("rate limited"));
    }
}
