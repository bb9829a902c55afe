//! Stored records and their icon/cover attachments

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::property::{Property, PropertyEntry};

/// Property map of a record, keyed by property name
pub type Properties = BTreeMap<String, PropertyEntry>;

/// URL of an externally hosted or store-hosted file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUrl {
    pub url: String,
}

/// Cover image of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileObject {
    External { external: FileUrl },
    File { file: FileUrl },
}

impl FileObject {
    pub fn external(url: impl Into<String>) -> Self {
        Self::External {
            external: FileUrl { url: url.into() },
        }
    }
}

/// Icon of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Icon {
    Emoji { emoji: String },
    External { external: FileUrl },
    File { file: FileUrl },
}

impl Icon {
    pub fn emoji(emoji: impl Into<String>) -> Self {
        Self::Emoji {
            emoji: emoji.into(),
        }
    }

    pub fn external(url: impl Into<String>) -> Self {
        Self::External {
            external: FileUrl { url: url.into() },
        }
    }
}

/// An existing record in a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub icon: Option<Icon>,
    #[serde(default)]
    pub cover: Option<FileObject>,
    #[serde(default)]
    pub properties: Properties,
}

impl Record {
    /// Create an empty record with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            archived: false,
            icon: None,
            cover: None,
            properties: Properties::new(),
        }
    }

    /// Add or replace a property
    pub fn with_property(
        mut self,
        key: impl Into<String>,
        entry: impl Into<PropertyEntry>,
    ) -> Self {
        self.properties.insert(key.into(), entry.into());
        self
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_cover(mut self, cover: FileObject) -> Self {
        self.cover = Some(cover);
        self
    }

    /// Look up a property by stable id, falling back to its name.
    ///
    /// Id matches take precedence so that callers can address a property
    /// even after it has been renamed.
    pub fn property(&self, name_or_id: &str) -> Option<&PropertyEntry> {
        self.properties
            .values()
            .find(|entry| entry.id.as_deref() == Some(name_or_id))
            .or_else(|| self.properties.get(name_or_id))
    }

    /// Plain text of the record's title property
    pub fn title(&self) -> Option<String> {
        let entry = self.property("title").filter(|e| matches!(e.value, Property::Title { .. }));
        entry
            .or_else(|| {
                self.properties
                    .values()
                    .find(|e| matches!(e.value, Property::Title { .. }))
            })
            .and_then(|e| e.value.plain_text())
    }

    /// Title for display, prefixed with the emoji icon when there is one.
    ///
    /// An empty or missing title is replaced by `placeholder`.
    pub fn title_with_emoji(&self, placeholder: &str) -> String {
        let title = self
            .title()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| placeholder.to_string());

        match &self.icon {
            Some(Icon::Emoji { emoji }) => format!("{} {}", emoji, title),
            _ => title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn property_lookup_prefers_id_over_name() {
        let record = Record::new("r1")
            .with_property("Status", PropertyEntry::with_id("abc", Property::select("Open")))
            .with_property("abc", Property::select("Shadowed"));

        let found = record.property("abc").unwrap();
        assert_eq!(found.value, Property::select("Open"));
    }

    #[test]
    fn property_lookup_falls_back_to_name() {
        let record = Record::new("r1").with_property("Status", Property::select("Open"));
        assert!(record.property("Status").is_some());
        assert!(record.property("Missing").is_none());
    }

    #[test]
    fn title_with_emoji_prefixes_icon() {
        let record = Record::new("r1")
            .with_property("Name", PropertyEntry::with_id("title", Property::title("Groceries")))
            .with_icon(Icon::emoji("🛒"));
        assert_eq!(record.title_with_emoji("Untitled"), "🛒 Groceries");
    }

    #[test]
    fn title_with_emoji_uses_placeholder_for_empty_title() {
        let record = Record::new("r1").with_property("Name", Property::title(""));
        assert_eq!(record.title_with_emoji("Untitled"), "Untitled");
    }

    #[test]
    fn external_icon_is_not_prefixed() {
        let record = Record::new("r1")
            .with_property("Name", Property::title("Doc"))
            .with_icon(Icon::external("https://example.com/i.png"));
        assert_eq!(record.title_with_emoji("Untitled"), "Doc");
    }

    #[test]
    fn cover_serializes_with_type_tag() {
        let record =
            Record::new("r1").with_cover(FileObject::external("https://example.com/c.png"));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["cover"]["type"], "external");
        assert_eq!(json["cover"]["external"]["url"], "https://example.com/c.png");
    }

    #[test]
    fn record_deserializes_with_missing_optionals() {
        let record: Record = serde_json::from_str(r#"{"id": "r9"}"#).unwrap();
        assert_eq!(record, Record::new("r9"));
    }
}
