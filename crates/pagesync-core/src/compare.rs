//! Type-aware property equality
//!
//! Two properties are only comparable when they share a variant. Anything
//! else means the desired schema and the stored schema disagree, which is
//! reported as [`Incomparable`] rather than guessed at.

use pagesync_model::{DateValue, Property, SelectOption, rich_text};

/// Returned when two properties cannot be compared
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported comparison of {new} against {old}")]
pub struct Incomparable {
    pub new: &'static str,
    pub old: &'static str,
}

/// Compare a desired property with a stored one.
///
/// - title / rich text: flattened plain text
/// - number: numeric value, both absent counts as equal
/// - select: stable id when both carry one, otherwise display name
/// - date: start and end by canonical string, both absent counts as equal
/// - relation: ids in order
/// - checkbox / url: plain value
///
/// Formula values and mismatched variants are [`Incomparable`].
pub fn properties_equal(new: &Property, old: &Property) -> Result<bool, Incomparable> {
    let equal = match (new, old) {
        (Property::Title { title: a }, Property::Title { title: b })
        | (Property::RichText { rich_text: a }, Property::RichText { rich_text: b }) => {
            rich_text::to_plain_text(a) == rich_text::to_plain_text(b)
        }
        (Property::Number { number: a }, Property::Number { number: b }) => a == b,
        (Property::Select { select: a }, Property::Select { select: b }) => selects_equal(a, b),
        (Property::Date { date: a }, Property::Date { date: b }) => {
            dates_equal(a.start.as_ref(), b.start.as_ref())
                && dates_equal(a.end.as_ref(), b.end.as_ref())
        }
        (Property::Relation { relation: a }, Property::Relation { relation: b }) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.id == y.id)
        }
        (Property::Checkbox { checkbox: a }, Property::Checkbox { checkbox: b }) => a == b,
        (Property::Url { url: a }, Property::Url { url: b }) => a == b,
        _ => {
            return Err(Incomparable {
                new: new.kind(),
                old: old.kind(),
            });
        }
    };
    Ok(equal)
}

// Ids survive renames, so a shared id wins over differing names
fn selects_equal(new: &SelectOption, old: &SelectOption) -> bool {
    if !old.id.is_empty() && new.id == old.id {
        return true;
    }
    new.name == old.name
}

fn dates_equal(a: Option<&DateValue>, b: Option<&DateValue>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.to_string() == b.to_string(),
        (None, None) => true,
        _ => false,
    }
}
