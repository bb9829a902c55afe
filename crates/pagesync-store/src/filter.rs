//! Query filters over record properties

use pagesync_model::{Property, Record};
use serde::{Deserialize, Serialize};

/// Condition applied to a single property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum Condition {
    TitleEquals(String),
    RichTextEquals(String),
    SelectEquals(String),
    NumberEquals(f64),
    CheckboxEquals(bool),
    RelationContains(String),
    /// Property is missing or holds no value
    IsEmpty,
}

impl Condition {
    fn holds(&self, value: Option<&Property>) -> bool {
        match (self, value) {
            (Self::TitleEquals(want), Some(p @ Property::Title { .. }))
            | (Self::RichTextEquals(want), Some(p @ Property::RichText { .. })) => {
                p.plain_text().as_deref() == Some(want.as_str())
            }
            (Self::SelectEquals(want), Some(Property::Select { select })) => &select.name == want,
            (Self::NumberEquals(want), Some(Property::Number { number })) => *number == Some(*want),
            (Self::CheckboxEquals(want), Some(Property::Checkbox { checkbox })) => checkbox == want,
            (Self::RelationContains(id), Some(Property::Relation { relation })) => {
                relation.iter().any(|r| &r.id == id)
            }
            (Self::IsEmpty, None) => true,
            (Self::IsEmpty, Some(p)) => is_empty_value(p),
            _ => false,
        }
    }
}

fn is_empty_value(prop: &Property) -> bool {
    match prop {
        Property::Title { .. } | Property::RichText { .. } => {
            prop.plain_text().is_none_or(|t| t.is_empty())
        }
        Property::Number { number } => number.is_none(),
        Property::Select { select } => select.name.is_empty() && select.id.is_empty(),
        Property::Date { date } => date.start.is_none() && date.end.is_none(),
        Property::Relation { relation } => relation.is_empty(),
        Property::Checkbox { .. } => false,
        Property::Url { url } => url.as_deref().is_none_or(str::is_empty),
        Property::Formula { formula } => formula.is_null(),
    }
}

/// Filter evaluated by the store when querying a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    Property {
        property: String,
        condition: Condition,
    },
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Filter {
    pub fn property(property: impl Into<String>, condition: Condition) -> Self {
        Self::Property {
            property: property.into(),
            condition,
        }
    }

    /// Evaluate the filter against a record.
    ///
    /// Properties are resolved by id first, then by name.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::Property {
                property,
                condition,
            } => condition.holds(record.property(property).map(|e| &e.value)),
            Self::And(filters) => filters.iter().all(|f| f.matches(record)),
            Self::Or(filters) => filters.iter().any(|f| f.matches(record)),
        }
    }
}
