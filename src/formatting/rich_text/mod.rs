// src/formatting/rich_text/mod.rs
//! Formatting of Notion rich text runs into inline Markdown.

mod annotations;

pub use annotations::MarkdownStyleRenderer;

use crate::types::{EquationData, Link, RichTextItem, RichTextType};

/// Formats a rich text run into inline Markdown.
pub fn rich_text_to_markdown(items: &[RichTextItem]) -> String {
    items.iter().map(format_single_item).collect()
}

fn format_single_item(item: &RichTextItem) -> String {
    match &item.text_type {
        RichTextType::Equation(EquationData { expression }) => format!("${}$", expression),

        RichTextType::Mention { url } => {
            let target = url.as_deref().or(item.href.as_deref());
            match target {
                Some(url) if !MarkdownStyleRenderer::is_markdown_link(&item.plain_text) => {
                    MarkdownStyleRenderer::apply_styles(&item.plain_text, &item.annotations, Some(url))
                }
                _ => MarkdownStyleRenderer::apply_styles(&item.plain_text, &item.annotations, None),
            }
        }

        RichTextType::Text { content, link } => {
            let url = link
                .as_ref()
                .map(|Link { url }| url.as_str())
                .or(item.href.as_deref());
            MarkdownStyleRenderer::apply_styles(content, &item.annotations, url)
        }
    }
}
