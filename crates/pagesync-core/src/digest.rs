//! Content digests
//!
//! A digest fingerprints an ordered block list so that a later run can tell
//! whether a record's children need rewriting without reading them back.

use pagesync_model::Block;
use sha2::{Digest, Sha256};

use crate::Result;

/// Hex-encoded SHA-256 of the block list's JSON form.
///
/// Order-sensitive: the same blocks in a different order give a different
/// digest.
pub fn content_digest(blocks: &[Block]) -> Result<String> {
    let data = serde_json::to_vec(blocks)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(format!("{:x}", hasher.finalize()))
}
