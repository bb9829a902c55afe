//! Reconciliation engine for pagesync
//!
//! Given a snapshot of the records in a collection and a sequence of desired
//! states, the engine:
//!
//! - **matches** each desired state to at most one existing record
//! - **diffs** properties, icon and content digest against that record
//! - **applies** only the needed mutation: create, update or nothing
//! - **archives** the records no desired state claimed
//!
//! # Architecture
//!
//! ```text
//!            pagesync-cli
//!                 |
//!           pagesync-core
//!            |         |
//!   pagesync-store  pagesync-model
//! ```
//!
//! # Example
//!
//! ```ignore
//! use pagesync_core::{Matcher, Synchronizer, SynchronizeRequest};
//! use pagesync_model::Property;
//!
//! let mut sync = Synchronizer::connect(store, &ctx, "tasks", None).await?;
//! sync.synchronize(
//!     &ctx,
//!     SynchronizeRequest::new(Matcher::by_title("Weekly review"))
//!         .property("Name", Property::title("Weekly review")),
//! )
//! .await?;
//! sync.delete_unmatched_pages(&ctx).await?;
//! ```

pub mod compare;
pub mod config;
pub mod digest;
pub mod error;
pub mod matcher;
pub mod report;
pub mod request;
pub mod synchronizer;

pub use compare::{Incomparable, properties_equal};
pub use config::SyncConfig;
pub use digest::content_digest;
pub use error::{Error, Result};
pub use matcher::Matcher;
pub use report::{SyncReport, run};
pub use request::{ContentSpec, SyncAction, SynchronizeRequest, SynchronizeResult};
pub use synchronizer::Synchronizer;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_comparison_names_key_and_variants() {
        let error = Error::UnsupportedComparison {
            key: "Status".to_string(),
            source: Incomparable {
                new: "select",
                old: "rich_text",
            },
        };

        let display = error.to_string();
        assert!(display.contains("Status"), "got: {}", display);
        assert!(display.contains("select"), "got: {}", display);
        assert!(display.contains("rich_text"), "got: {}", display);
    }
}
