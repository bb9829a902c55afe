//! Data model for pagesync
//!
//! Records ("pages") live in a remote collection ("database"). Each record
//! carries typed properties, an optional icon and cover, and an ordered list
//! of content blocks stored as its children.
//!
//! - [`Property`]: tagged union over the supported property variants
//! - [`Record`]: an existing stored item as returned by the store
//! - [`Block`]: one content block
//! - [`rich_text`]: conversion between plain text and rich-text spans

pub mod block;
pub mod error;
pub mod property;
pub mod record;
pub mod rich_text;

pub use block::{Block, BlockKind, CodeBody, TextBody, ToDoBody};
pub use error::{Error, Result};
pub use property::{DateRange, DateValue, Property, PropertyEntry, RelationRef, SelectOption};
pub use record::{FileObject, FileUrl, Icon, Properties, Record};
pub use rich_text::{Annotations, RichText};
