// src/formatting/mod.rs
//! Converts Notion block trees into Markdown and assembles the final document.

pub mod block_renderer;
mod pure_visitor;
mod rich_text;
mod state;

pub use block_renderer::{convert_blocks, render_blocks};
pub use pure_visitor::anchor_slug;
pub use rich_text::rich_text_to_markdown;

use crate::constants::DEFAULT_DOCUMENT_TITLE;
use indexmap::IndexMap;

/// Options controlling the block to Markdown conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSettings {
    /// Fetch and render the content of child pages.
    pub parse_child_pages: bool,
    /// Emit child pages as separate sections instead of inline.
    pub separate_child_pages: bool,
    /// Heading prepended to the page content.
    pub document_title: String,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            parse_child_pages: true,
            separate_child_pages: false,
            document_title: DEFAULT_DOCUMENT_TITLE.to_string(),
        }
    }
}

/// What a Markdown converter produces for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertedMarkdown {
    /// The page content plus child page sections keyed by title, in page order.
    Sections {
        parent: String,
        children: IndexMap<String, String>,
    },
    /// Already flattened Markdown from a converter that does not split
    /// sections. [`convert_blocks`] never produces it; [`assemble_document`]
    /// returns it untitled.
    Raw(String),
}

/// Reduces a conversion result to the single Markdown document returned to
/// callers.
///
/// A non-empty parent section is titled `# {title}`; anything else is passed
/// through as text.
pub fn assemble_document(converted: ConvertedMarkdown, title: &str) -> String {
    match converted {
        ConvertedMarkdown::Sections { parent, .. } if !parent.is_empty() => {
            format!("# {}\n\n{}", title, parent)
        }
        ConvertedMarkdown::Sections { children, .. } => {
            children.into_values().collect::<Vec<_>>().join("\n\n")
        }
        ConvertedMarkdown::Raw(text) => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parent_section_gets_default_title() {
        let converted = ConvertedMarkdown::Sections {
            parent: "Hello".to_string(),
            children: IndexMap::new(),
        };
        assert_eq!(
            assemble_document(converted, DEFAULT_DOCUMENT_TITLE),
            "# Notion Export\n\nHello"
        );
    }

    #[test]
    fn test_raw_text_passes_through() {
        let converted = ConvertedMarkdown::Raw("Hello".to_string());
        assert_eq!(assemble_document(converted, DEFAULT_DOCUMENT_TITLE), "Hello");
    }

    #[test]
    fn test_empty_parent_falls_back_to_child_sections() {
        let mut children = IndexMap::new();
        children.insert("One".to_string(), "first".to_string());
        children.insert("Two".to_string(), "second".to_string());
        let converted = ConvertedMarkdown::Sections {
            parent: String::new(),
            children,
        };
        assert_eq!(
            assemble_document(converted, DEFAULT_DOCUMENT_TITLE),
            "first\n\nsecond"
        );
    }

    #[test]
    fn test_custom_title() {
        let converted = ConvertedMarkdown::Sections {
            parent: "Body".to_string(),
            children: IndexMap::new(),
        };
        assert_eq!(assemble_document(converted, "Roadmap"), "# Roadmap\n\nBody");
    }
}
