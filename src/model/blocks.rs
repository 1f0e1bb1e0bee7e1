use super::common::BlockCommon;
use crate::types::{BlockId, RichTextItem};
use serde::{Deserialize, Serialize};

/// Text content shared by paragraph-like blocks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextBlockContent {
    pub rich_text: Vec<RichTextItem>,
}

impl TextBlockContent {
    pub fn new(rich_text: Vec<RichTextItem>) -> Self {
        Self { rich_text }
    }

    /// Convenience constructor for a single unstyled run.
    pub fn plain(text: &str) -> Self {
        Self::new(vec![RichTextItem::plain_text(text)])
    }
}

/// Paragraph, quote, list item and toggle blocks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Heading block (levels 1–3)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingBlock {
    pub common: BlockCommon,
    pub level: u8,
    pub content: TextBlockContent,
}

/// To-do block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ToDoBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub checked: bool,
}

/// Callout block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalloutBlock {
    pub common: BlockCommon,
    pub icon: Option<String>,
    pub content: TextBlockContent,
}

/// Code block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub common: BlockCommon,
    pub language: String,
    pub caption: Vec<RichTextItem>,
    pub content: TextBlockContent,
}

/// Equation block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationBlock {
    pub common: BlockCommon,
    pub expression: String,
}

/// Blocks that carry nothing but their position and children
/// (divider, breadcrumb, table of contents, column list, column).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarkerBlock {
    pub common: BlockCommon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Image,
    Video,
    File,
    Pdf,
}

impl MediaKind {
    /// Link text used when the block has no caption.
    pub fn default_label(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::File => "file",
            Self::Pdf => "pdf",
        }
    }
}

/// Uploaded or externally hosted media
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaBlock {
    pub common: BlockCommon,
    pub kind: MediaKind,
    pub url: String,
    pub caption: Vec<RichTextItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WebLinkKind {
    Bookmark,
    Embed,
    LinkPreview,
}

/// Bookmark, embed and link preview blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebLinkBlock {
    pub common: BlockCommon,
    pub kind: WebLinkKind,
    pub url: String,
    pub caption: Vec<RichTextItem>,
}

/// Child page or child database reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildBlock {
    pub common: BlockCommon,
    pub title: String,
}

/// Link to page block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkToPageBlock {
    pub common: BlockCommon,
    pub page_id: BlockId,
}

/// Table block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableBlock {
    pub common: BlockCommon,
    pub table_width: usize,
    pub has_column_header: bool,
}

/// Table row block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRowBlock {
    pub common: BlockCommon,
    pub cells: Vec<Vec<RichTextItem>>,
}

/// Synced block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncedBlock {
    pub common: BlockCommon,
    pub synced_from: Option<BlockId>,
}

/// Unsupported block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsupportedBlock {
    pub common: BlockCommon,
    pub block_type: String,
}
