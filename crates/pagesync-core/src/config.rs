//! Run configuration parsed from TOML
//!
//! ```toml
//! collection = "4d9c1f0e-tasks"
//! digest_property = "Digest"
//! archive_unmatched = true
//! timeout_secs = 30
//!
//! [filter.property]
//! property = "Team"
//! condition = { op = "select_equals", value = "Platform" }
//! ```

use std::path::Path;
use std::time::Duration;

use pagesync_store::{Context, Filter};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

fn default_digest_property() -> String {
    "Digest".to_string()
}

fn default_archive_unmatched() -> bool {
    true
}

/// Configuration of one reconciliation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Id of the target collection
    pub collection: String,

    /// Name or id of the rich-text property storing content digests
    #[serde(default = "default_digest_property")]
    pub digest_property: String,

    /// Archive records no desired entry matched once the run completes
    #[serde(default = "default_archive_unmatched")]
    pub archive_unmatched: bool,

    /// Restricts which existing records take part in the run
    #[serde(default)]
    pub filter: Option<Filter>,

    /// Deadline for the whole run, in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl SyncConfig {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            digest_property: default_digest_property(),
            archive_unmatched: default_archive_unmatched(),
            filter: None,
            timeout_secs: None,
        }
    }

    /// Parse and validate configuration from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        let config: SyncConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.collection.trim().is_empty() {
            return Err(Error::InvalidConfig {
                message: "collection must not be empty".to_string(),
            });
        }
        if self.digest_property.trim().is_empty() {
            return Err(Error::InvalidConfig {
                message: "digest_property must not be empty".to_string(),
            });
        }
        if self.timeout_secs == Some(0) {
            return Err(Error::InvalidConfig {
                message: "timeout_secs must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Call context carrying the configured deadline, if any
    pub fn context(&self) -> Context {
        match self.timeout_secs {
            Some(secs) => Context::with_timeout(Duration::from_secs(secs)),
            None => Context::new(),
        }
    }
}
