//! Command implementations for pagesync-cli

pub mod list;
pub mod sync;

pub use list::run_list;
pub use sync::{SyncArgs, run_sync};
