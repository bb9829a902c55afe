//! Snapshot and desired-record files

use std::path::Path;

use pagesync_core::{ContentSpec, Matcher, SynchronizeRequest};
use pagesync_model::{Block, FileObject, Icon};
use pagesync_store::{PropertyMap, SnapshotEntry};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// How a desired record finds its existing counterpart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Record with this id
    Id(String),
    /// Record whose title text equals this
    Title(String),
    /// Record whose property equals the desired value of this key
    Property(String),
}

/// One entry of the desired-records file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesiredRecord {
    #[serde(rename = "match")]
    pub match_rule: MatchRule,
    #[serde(default)]
    pub properties: PropertyMap,
    #[serde(default)]
    pub icon: Option<Icon>,
    #[serde(default)]
    pub cover: Option<FileObject>,
    #[serde(default)]
    pub content: Option<Vec<Block>>,
}

impl DesiredRecord {
    /// Build the synchronize request, storing content digests in `digest_property`
    pub fn into_request(self, digest_property: &str) -> Result<SynchronizeRequest> {
        let matcher = match &self.match_rule {
            MatchRule::Id(id) => Matcher::by_id(id.clone()),
            MatchRule::Title(title) => Matcher::by_title(title.clone()),
            MatchRule::Property(key) => {
                let value = self.properties.get(key).cloned().ok_or_else(|| {
                    CliError::user(format!(
                        "Desired record matches on property '{}' but does not set it",
                        key
                    ))
                })?;
                Matcher::by_property(key.clone(), value)
            }
        };

        let mut request = SynchronizeRequest::new(matcher);
        request.properties = self.properties;
        request.icon = self.icon;
        request.cover = self.cover;
        request.children = self
            .content
            .map(|blocks| ContentSpec::new(digest_property, blocks));
        Ok(request)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(CliError::user(format!("File not found: {}", path.display())));
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_desired(path: &Path) -> Result<Vec<DesiredRecord>> {
    read_json(path)
}

pub fn load_snapshot(path: &Path) -> Result<Vec<SnapshotEntry>> {
    read_json(path)
}

/// Write `entries` to `path` as pretty JSON
pub fn save_snapshot(path: &Path, entries: &[SnapshotEntry]) -> Result<()> {
    let mut content = serde_json::to_string_pretty(entries)?;
    content.push('\n');
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesync_model::{Property, Record};
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> DesiredRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_match_rules() {
        let by_id = parse(r#"{"match": {"id": "r1"}}"#);
        assert_eq!(by_id.match_rule, MatchRule::Id("r1".into()));

        let by_prop = parse(r#"{"match": {"property": "Key"}}"#);
        assert_eq!(by_prop.match_rule, MatchRule::Property("Key".into()));
    }

    #[test]
    fn property_rule_uses_desired_value() {
        let desired = parse(
            r#"{
                "match": {"property": "Key"},
                "properties": {"Key": {"type": "rich_text", "rich_text": [{"plain_text": "K-1"}]}}
            }"#,
        );
        let request = desired.into_request("Digest").unwrap();
        let matcher = request.matcher.unwrap();

        let hit = Record::new("a").with_property("Key", Property::rich_text("K-1"));
        let miss = Record::new("b").with_property("Key", Property::rich_text("K-2"));
        assert!(matcher.matches(&hit));
        assert!(!matcher.matches(&miss));
    }

    #[test]
    fn property_rule_without_value_is_rejected() {
        let desired = parse(r#"{"match": {"property": "Key"}}"#);
        assert!(matches!(
            desired.into_request("Digest"),
            Err(CliError::User { .. })
        ));
    }

    #[test]
    fn content_becomes_children_with_digest_property() {
        let desired = parse(r#"{"match": {"title": "T"}, "content": [{"type": "divider"}]}"#);
        let request = desired.into_request("Hash").unwrap();
        let children = request.children.unwrap();
        assert_eq!(children.digest_property, "Hash");
        assert_eq!(children.blocks, vec![Block::divider()]);
    }

    #[test]
    fn missing_file_is_a_user_error() {
        let err = load_snapshot(Path::new("/nonexistent/snapshot.json")).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
