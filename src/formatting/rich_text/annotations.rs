// src/formatting/rich_text/annotations.rs
//! Applying Notion annotations as Markdown markers.

use crate::types::Annotations;

/// Renderer for annotations to Markdown.
pub struct MarkdownStyleRenderer;

impl MarkdownStyleRenderer {
    /// Wraps `content` in the markers for `annotations`, then in a link
    /// when `link` is given.
    ///
    /// Surrounding whitespace stays outside the markers: `**word **` is not
    /// bold in CommonMark, `**word** ` is.
    pub fn apply_styles(content: &str, annotations: &Annotations, link: Option<&str>) -> String {
        let core = content.trim();
        if core.is_empty() {
            return content.to_string();
        }
        let leading = &content[..content.len() - content.trim_start().len()];
        let trailing = &content[content.trim_end().len()..];

        let mut result = core.to_string();

        if annotations.code {
            result = format!("`{}`", result);
        }
        if annotations.strikethrough {
            result = format!("~~{}~~", result);
        }
        if annotations.bold {
            result = format!("**{}**", result);
        }
        if annotations.italic {
            result = format!("*{}*", result);
        }
        if annotations.underline {
            result = format!("<u>{}</u>", result);
        }
        if let Some(url) = link {
            result = format!("[{}]({})", result, url);
        }

        format!("{}{}{}", leading, result, trailing)
    }

    /// Checks if content already looks like a Markdown link.
    pub fn is_markdown_link(content: &str) -> bool {
        content.starts_with('[') && content.contains("](") && content.ends_with(')')
    }
}
