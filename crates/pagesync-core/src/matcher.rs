//! Caller-supplied record identity predicates

use std::fmt;

use pagesync_model::{Property, Record};

use crate::compare::properties_equal;

type Predicate = dyn Fn(&Record) -> bool + Send + Sync;

/// Decides which existing record a synchronize request refers to
pub struct Matcher(Box<Predicate>);

impl Matcher {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        Self(Box::new(predicate))
    }

    /// Match the record with exactly this id
    pub fn by_id(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(move |record| record.id == id)
    }

    /// Match records whose title text equals `title`
    pub fn by_title(title: impl Into<String>) -> Self {
        let title = title.into();
        Self::new(move |record| record.title().as_deref() == Some(title.as_str()))
    }

    /// Match records whose property `key` equals `value`.
    ///
    /// Records lacking the property, or holding an incomparable variant,
    /// do not match.
    pub fn by_property(key: impl Into<String>, value: Property) -> Self {
        let key = key.into();
        Self::new(move |record| {
            record
                .property(&key)
                .is_some_and(|entry| properties_equal(&value, &entry.value) == Ok(true))
        })
    }

    pub fn matches(&self, record: &Record) -> bool {
        (self.0)(record)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Matcher(..)")
    }
}
