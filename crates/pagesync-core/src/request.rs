//! Synchronize requests and their results

use pagesync_model::{Block, FileObject, Icon, Property, Record};
use pagesync_store::{CreateRequest, PropertyMap, UpdateRequest};

use crate::Result;
use crate::digest::content_digest;
use crate::matcher::Matcher;

/// Desired children of a record plus where their digest is kept
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSpec {
    /// Name or id of the rich-text property holding the digest
    pub digest_property: String,
    pub blocks: Vec<Block>,
}

impl ContentSpec {
    pub fn new(digest_property: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            digest_property: digest_property.into(),
            blocks,
        }
    }

    /// Digest of [`Self::blocks`]
    pub fn digest(&self) -> Result<String> {
        content_digest(&self.blocks)
    }
}

/// Desired state of one logical record
///
/// Only the properties listed here are ever written; properties absent from
/// the request are left alone on the stored record.
#[derive(Debug, Default)]
pub struct SynchronizeRequest {
    pub properties: PropertyMap,
    pub children: Option<ContentSpec>,
    pub icon: Option<Icon>,
    /// Accepted for completeness; covers are not synchronized
    pub cover: Option<FileObject>,
    pub matcher: Option<Matcher>,
}

impl SynchronizeRequest {
    pub fn new(matcher: Matcher) -> Self {
        Self {
            matcher: Some(matcher),
            ..Self::default()
        }
    }

    pub fn property(mut self, key: impl Into<String>, value: Property) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn cover(mut self, cover: FileObject) -> Self {
        self.cover = Some(cover);
        self
    }

    pub fn children(mut self, content: ContentSpec) -> Self {
        self.children = Some(content);
        self
    }
}

/// What a synchronize call did to the store
#[derive(Debug, Clone, PartialEq)]
pub enum SyncAction {
    /// No record matched; one was created with this payload
    Created(CreateRequest),
    /// A record matched and was updated with this payload
    Updated(UpdateRequest),
    /// A record matched and already had the desired state
    Unchanged,
}

/// Outcome of a synchronize call
#[derive(Debug, Clone, PartialEq)]
pub struct SynchronizeResult {
    /// The record as it stands after the call
    pub record: Record,
    pub action: SyncAction,
}

impl SynchronizeResult {
    pub fn create_request(&self) -> Option<&CreateRequest> {
        match &self.action {
            SyncAction::Created(req) => Some(req),
            _ => None,
        }
    }

    pub fn update_request(&self) -> Option<&UpdateRequest> {
        match &self.action {
            SyncAction::Updated(req) => Some(req),
            _ => None,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.action == SyncAction::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_request_has_no_matcher() {
        assert!(SynchronizeRequest::default().matcher.is_none());
    }

    #[test]
    fn builder_collects_properties() {
        let req = SynchronizeRequest::new(Matcher::by_id("r1"))
            .property("Name", Property::title("A"))
            .property("Points", Property::number(2.0))
            .icon(Icon::emoji("📝"));
        assert_eq!(req.properties.len(), 2);
        assert!(req.icon.is_some());
        assert!(req.matcher.is_some());
    }

    #[test]
    fn content_spec_digest_matches_blocks() {
        let blocks = vec![Block::paragraph("x")];
        let content = ContentSpec::new("Digest", blocks.clone());
        assert_eq!(content.digest().unwrap(), content_digest(&blocks).unwrap());
    }

    #[test]
    fn result_accessors_follow_action() {
        let result = SynchronizeResult {
            record: Record::new("r1"),
            action: SyncAction::Updated(UpdateRequest::default()),
        };
        assert!(result.update_request().is_some());
        assert!(result.create_request().is_none());
        assert!(!result.is_unchanged());
    }
}
