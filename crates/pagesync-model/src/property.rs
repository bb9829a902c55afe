//! Typed property values
//!
//! [`Property`] is a closed tagged union. Stored records wrap each value in a
//! [`PropertyEntry`] which also carries the store's stable property id.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::rich_text::{self, RichText};
use crate::{Error, Result};

/// Option of a select property
///
/// The id is stable across renames; the name is what users see.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Reference to a related record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRef {
    pub id: String,
}

/// A calendar date or a timestamp with offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateValue {
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
}

impl FromStr for DateValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::Date(date));
        }
        DateTime::parse_from_rfc3339(s)
            .map(Self::DateTime)
            .map_err(|_| Error::InvalidDate {
                value: s.to_string(),
            })
    }
}

/// Canonical string form, used both on the wire and for comparison
impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

impl Serialize for DateValue {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateValue {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Start and end of a date property, each optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<DateValue>,
    #[serde(default)]
    pub end: Option<DateValue>,
}

/// Typed property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Property {
    Title {
        title: Vec<RichText>,
    },
    RichText {
        rich_text: Vec<RichText>,
    },
    Number {
        #[serde(default)]
        number: Option<f64>,
    },
    Select {
        #[serde(default)]
        select: SelectOption,
    },
    Date {
        #[serde(default)]
        date: DateRange,
    },
    Relation {
        #[serde(default)]
        relation: Vec<RelationRef>,
    },
    Checkbox {
        checkbox: bool,
    },
    Url {
        #[serde(default)]
        url: Option<String>,
    },
    /// Computed by the store; read-only
    Formula {
        formula: serde_json::Value,
    },
}

impl Property {
    pub fn title(text: impl Into<String>) -> Self {
        Self::Title {
            title: rich_text::from_plain_text(text),
        }
    }

    pub fn rich_text(text: impl Into<String>) -> Self {
        Self::RichText {
            rich_text: rich_text::from_plain_text(text),
        }
    }

    pub fn number(value: f64) -> Self {
        Self::Number {
            number: Some(value),
        }
    }

    pub fn select(name: impl Into<String>) -> Self {
        Self::Select {
            select: SelectOption {
                id: String::new(),
                name: name.into(),
            },
        }
    }

    pub fn select_with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Select {
            select: SelectOption {
                id: id.into(),
                name: name.into(),
            },
        }
    }

    pub fn date(start: Option<DateValue>, end: Option<DateValue>) -> Self {
        Self::Date {
            date: DateRange { start, end },
        }
    }

    pub fn relation<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Relation {
            relation: ids
                .into_iter()
                .map(|id| RelationRef { id: id.into() })
                .collect(),
        }
    }

    pub fn checkbox(checked: bool) -> Self {
        Self::Checkbox { checkbox: checked }
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::Url {
            url: Some(url.into()),
        }
    }

    /// Name of the variant, matching the serialized `type` tag
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Title { .. } => "title",
            Self::RichText { .. } => "rich_text",
            Self::Number { .. } => "number",
            Self::Select { .. } => "select",
            Self::Date { .. } => "date",
            Self::Relation { .. } => "relation",
            Self::Checkbox { .. } => "checkbox",
            Self::Url { .. } => "url",
            Self::Formula { .. } => "formula",
        }
    }

    /// Flattened text of a title or rich-text property
    pub fn plain_text(&self) -> Option<String> {
        match self {
            Self::Title { title } => Some(rich_text::to_plain_text(title)),
            Self::RichText { rich_text } => Some(rich_text::to_plain_text(rich_text)),
            _ => None,
        }
    }
}

/// A property as stored on a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyEntry {
    /// Stable property id assigned by the store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub value: Property,
}

impl PropertyEntry {
    pub fn new(value: Property) -> Self {
        Self { id: None, value }
    }

    pub fn with_id(id: impl Into<String>, value: Property) -> Self {
        Self {
            id: Some(id.into()),
            value,
        }
    }
}

impl From<Property> for PropertyEntry {
    fn from(value: Property) -> Self {
        Self::new(value)
    }
}
