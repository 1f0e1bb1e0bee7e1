use serde::{Deserialize, Serialize};

/// Text styling flags carried by every rich text item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationData {
    pub expression: String,
}

/// The kind of rich text content.
///
/// Mentions keep only what Markdown can show: the rendered text and,
/// when Notion provides one, the target URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RichTextType {
    Text { content: String, link: Option<Link> },
    Mention { url: Option<String> },
    Equation(EquationData),
}

/// Rich text item with formatting annotations.
///
/// `plain_text` is the fallback rendering for any variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextItem {
    pub text_type: RichTextType,
    pub annotations: Annotations,
    pub plain_text: String,
    pub href: Option<String>,
}

impl RichTextItem {
    /// Create a plain text item — the most common rich text variant.
    pub fn plain_text(text: &str) -> Self {
        Self {
            text_type: RichTextType::Text {
                content: text.to_string(),
                link: None,
            },
            annotations: Annotations::default(),
            plain_text: text.to_string(),
            href: None,
        }
    }

    /// Returns a copy with the given annotations applied.
    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// Returns a copy linking to `url`.
    pub fn with_link(mut self, url: &str) -> Self {
        if let RichTextType::Text { ref mut link, .. } = self.text_type {
            *link = Some(Link {
                url: url.to_string(),
            });
        }
        self.href = Some(url.to_string());
        self
    }
}

/// Concatenates the plain text of a rich text run.
pub fn plain_text_of(items: &[RichTextItem]) -> String {
    items.iter().map(|item| item.plain_text.as_str()).collect()
}
