//! Content blocks stored as a record's children

use serde::{Deserialize, Serialize};

use crate::rich_text::{self, RichText};

/// Text body shared by most block kinds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBody {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
}

impl TextBody {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            rich_text: rich_text::from_plain_text(text),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToDoBody {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBody {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub language: String,
}

/// Kind-specific payload of a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    Paragraph { paragraph: TextBody },
    #[serde(rename = "heading_1")]
    Heading1 { heading_1: TextBody },
    #[serde(rename = "heading_2")]
    Heading2 { heading_2: TextBody },
    #[serde(rename = "heading_3")]
    Heading3 { heading_3: TextBody },
    BulletedListItem { bulleted_list_item: TextBody },
    NumberedListItem { numbered_list_item: TextBody },
    ToDo { to_do: ToDoBody },
    Quote { quote: TextBody },
    Code { code: CodeBody },
    Divider {},
}

/// A content block
///
/// Blocks built locally have no id; the store assigns one when they are
/// appended to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub kind: BlockKind,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self { id: None, kind }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Paragraph {
            paragraph: TextBody::plain(text),
        })
    }

    /// Heading block; `level` is clamped to `1..=3`, so 0 gives a level 1
    /// heading and anything above 3 a level 3 heading.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        let body = TextBody::plain(text);
        Self::new(match level.clamp(1, 3) {
            1 => BlockKind::Heading1 { heading_1: body },
            2 => BlockKind::Heading2 { heading_2: body },
            _ => BlockKind::Heading3 { heading_3: body },
        })
    }

    pub fn bulleted(text: impl Into<String>) -> Self {
        Self::new(BlockKind::BulletedListItem {
            bulleted_list_item: TextBody::plain(text),
        })
    }

    pub fn numbered(text: impl Into<String>) -> Self {
        Self::new(BlockKind::NumberedListItem {
            numbered_list_item: TextBody::plain(text),
        })
    }

    pub fn to_do(text: impl Into<String>, checked: bool) -> Self {
        Self::new(BlockKind::ToDo {
            to_do: ToDoBody {
                rich_text: rich_text::from_plain_text(text),
                checked,
            },
        })
    }

    pub fn quote(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Quote {
            quote: TextBody::plain(text),
        })
    }

    pub fn code(language: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(BlockKind::Code {
            code: CodeBody {
                rich_text: rich_text::from_plain_text(source),
                language: language.into(),
            },
        })
    }

    pub fn divider() -> Self {
        Self::new(BlockKind::Divider {})
    }

    /// Same block with the given id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Copy of this block as it would be submitted: without an id
    pub fn without_id(&self) -> Self {
        Self {
            id: None,
            kind: self.kind.clone(),
        }
    }
}
