//! Shared test utilities for the pagesync workspace.
//!
//! This crate provides standardised fixtures to avoid duplication across
//! crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`records`]: record and block fixtures
//! - [`store`]: seeded [`MemoryStore`](pagesync_store::MemoryStore) helpers

pub mod records;
pub mod store;
