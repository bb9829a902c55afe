//! Rich-text spans and conversion to and from plain text

use serde::{Deserialize, Serialize};

/// Text styling attached to a rich-text span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotations {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub code: bool,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "default".to_string()
}

impl Default for Annotations {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            strikethrough: false,
            underline: false,
            code: false,
            color: default_color(),
        }
    }
}

/// Text payload of a span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// One span of rich text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    /// Unformatted text of this span
    pub plain_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl RichText {
    /// Create an unstyled span holding `text`
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            text: Some(TextContent {
                content: text.clone(),
                link: None,
            }),
            plain_text: text,
            annotations: None,
            href: None,
        }
    }

    /// Attach styling to this span
    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = Some(annotations);
        self
    }
}

/// Flatten rich text into a single string by concatenating plain text.
pub fn to_plain_text(spans: &[RichText]) -> String {
    spans.iter().map(|rt| rt.plain_text.as_str()).collect()
}

/// Build a rich-text value consisting of one unstyled span.
pub fn from_plain_text(text: impl Into<String>) -> Vec<RichText> {
    vec![RichText::plain(text)]
}

/// Build a rich-text value consisting of one span with the given styling.
pub fn from_plain_text_with(text: impl Into<String>, annotations: Annotations) -> Vec<RichText> {
    vec![RichText::plain(text).with_annotations(annotations)]
}
