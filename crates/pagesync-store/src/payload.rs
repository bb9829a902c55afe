//! Request and response payloads exchanged with a store

use std::collections::BTreeMap;

use pagesync_model::{Block, FileObject, Icon, Property, Record};
use serde::{Deserialize, Serialize};

use crate::filter::Filter;

/// Properties submitted in a create or update, keyed by name or id
pub type PropertyMap = BTreeMap<String, Property>;

/// Largest page a query may request
pub const MAX_PAGE_SIZE: u32 = 100;

/// Collection a new record is created under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parent {
    pub database_id: String,
}

/// Payload for creating a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRequest {
    pub parent: Parent,
    #[serde(default)]
    pub properties: PropertyMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<FileObject>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

impl CreateRequest {
    pub fn new(database_id: impl Into<String>) -> Self {
        Self {
            parent: Parent {
                database_id: database_id.into(),
            },
            properties: PropertyMap::new(),
            icon: None,
            cover: None,
            children: Vec::new(),
        }
    }
}

/// Payload for updating a record
///
/// Only the properties present in the map are touched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    pub properties: PropertyMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<FileObject>,
    #[serde(default)]
    pub archived: bool,
}

impl UpdateRequest {
    /// Archive request with an empty property diff
    pub fn archive() -> Self {
        Self {
            archived: true,
            ..Self::default()
        }
    }

    /// True when nothing about the record would change
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.icon.is_none() && self.cover.is_none() && !self.archived
    }
}

/// One page of a collection query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
}

impl QueryRequest {
    pub fn new(filter: Option<Filter>) -> Self {
        Self {
            filter,
            page_size: MAX_PAGE_SIZE,
            start_cursor: None,
        }
    }
}

/// Result page of a collection query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub results: Vec<Record>,
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_request_has_no_property_diff() {
        let req = UpdateRequest::archive();
        assert!(req.archived);
        assert!(req.properties.is_empty());
        assert!(!req.is_empty());
    }

    #[test]
    fn default_update_is_empty() {
        assert!(UpdateRequest::default().is_empty());
    }

    #[test]
    fn query_request_uses_max_page_size() {
        assert_eq!(QueryRequest::new(None).page_size, MAX_PAGE_SIZE);
    }
}
