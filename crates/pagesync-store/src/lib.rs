//! Remote record store contract for pagesync
//!
//! The reconciler never talks to the network directly. It drives a
//! [`RecordStore`], passing the caller's [`Context`] through to every call.
//!
//! - [`RecordStore`]: async trait over the store's primitive operations
//! - [`query_all`]: drains query pagination into one ordered snapshot
//! - [`clear_children`]: deletes every child block of a record
//! - [`MemoryStore`]: in-process implementation with a call journal

pub mod client;
pub mod context;
pub mod error;
pub mod filter;
pub mod memory;
pub mod payload;

pub use client::{RecordStore, clear_children, query_all};
pub use context::Context;
pub use error::{Error, Result};
pub use filter::{Condition, Filter};
pub use memory::{Call, CallKind, MemoryStore, SnapshotEntry};
pub use payload::{
    CreateRequest, MAX_PAGE_SIZE, Parent, PropertyMap, QueryRequest, QueryResponse, UpdateRequest,
};
