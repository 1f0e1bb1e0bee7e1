// src/formatting/pure_visitor.rs
//! Per-block Markdown formatting.
//!
//! Each block renders to a self-contained chunk ending in a newline (or to
//! nothing at all). Joining chunks into a document is the job of
//! `block_renderer::render_sequence`.

use super::block_renderer::render_sequence;
use super::rich_text::rich_text_to_markdown;
use super::state::FormatContext;
use super::ConversionSettings;
use crate::constants::{BLOCK_MAX_RENDER_DEPTH, NOTION_PAGE_BASE_URL};
use crate::error::AppError;
use crate::model::*;
use crate::types::{plain_text_of, BlockId, RichTextItem};

/// Table of contents entry
#[derive(Debug, Clone, PartialEq, Eq)]
struct TocEntry {
    level: u8,
    text: String,
}

/// The result of rendering a single block: content plus updated context.
#[derive(Debug, Clone)]
pub struct BlockRenderResult {
    pub content: String,
    pub context: FormatContext,
}

/// Trait for formatting blocks into output strings.
pub trait BlockRenderer {
    /// Format a block and return the rendered result.
    fn render_block(
        &self,
        block: &Block,
        context: FormatContext,
    ) -> Result<BlockRenderResult, AppError>;
}

/// Formats Notion blocks as Markdown.
pub struct MarkdownBlockRenderer<'a> {
    settings: &'a ConversionSettings,
    /// All blocks of the document, for table of contents generation
    document_blocks: &'a [Block],
}

impl<'a> MarkdownBlockRenderer<'a> {
    pub fn new(settings: &'a ConversionSettings, document_blocks: &'a [Block]) -> Self {
        Self {
            settings,
            document_blocks,
        }
    }

    /// Renders a block's children as their own sequence.
    fn format_children(
        &self,
        children: &[Block],
        context: FormatContext,
    ) -> Result<String, AppError> {
        if children.is_empty() {
            return Ok(String::new());
        }
        render_sequence(self, children, context.enter_children())
    }

    /// Text line with a prefix; `None` when the text is blank.
    fn text_line(&self, content: &TextBlockContent, prefix: &str) -> Option<String> {
        let text = rich_text_to_markdown(&content.rich_text);
        if text.trim().is_empty() {
            None
        } else {
            Some(format!("{}{}\n", prefix, text))
        }
    }

    /// Paragraph-like block: the text, then its children as following blocks.
    fn format_text_block(
        &self,
        content: &TextBlockContent,
        prefix: &str,
        children: &[Block],
        context: FormatContext,
    ) -> Result<String, AppError> {
        let text = self.text_line(content, prefix).unwrap_or_default();
        let child_md = self.format_children(children, context)?;
        Ok(join_chunks(&text, &child_md))
    }

    fn format_heading(&self, b: &HeadingBlock, context: FormatContext) -> Result<String, AppError> {
        let marker = format!("{} ", "#".repeat(b.level.clamp(1, 6) as usize));
        self.format_text_block(&b.content, &marker, &b.common.children, context)
    }

    /// List item: marker line, children indented beneath it.
    ///
    /// Nested lines are indented to the marker's width so `10. ` and
    /// `- [ ] ` items keep their content.
    fn format_list_item(
        &self,
        content: &TextBlockContent,
        marker: &str,
        children: &[Block],
        context: FormatContext,
    ) -> Result<String, AppError> {
        let indent = " ".repeat(marker.chars().count());
        let text = rich_text_to_markdown(&content.rich_text);
        let mut result = format!("{}{}\n", marker, continuation_lines(&text, &indent));
        let child_md = self.format_children(children, context)?;
        if !child_md.is_empty() {
            result.push_str(&indent_block_content(&child_md, &indent));
        }
        Ok(result)
    }

    fn format_todo(&self, b: &ToDoBlock, context: FormatContext) -> Result<String, AppError> {
        let marker = if b.checked { "- [x] " } else { "- [ ] " };
        self.format_list_item(&b.content, marker, &b.common.children, context)
    }

    /// Toggles become collapsible HTML sections around Markdown content.
    fn format_toggle(&self, b: &TextBlock, context: FormatContext) -> Result<String, AppError> {
        let summary = rich_text_to_markdown(&b.content.rich_text);
        let child_md = self.format_children(&b.common.children, context)?;
        let mut result = format!("<details>\n<summary>{}</summary>\n\n", summary.trim());
        if !child_md.is_empty() {
            result.push_str(&child_md);
            result.push('\n');
        }
        result.push_str("</details>\n");
        Ok(result)
    }

    /// Quote-like block: text and children all prefixed with `> `.
    fn format_quoted(
        &self,
        first_line: String,
        children: &[Block],
        context: FormatContext,
    ) -> Result<String, AppError> {
        let child_md = self.format_children(children, context)?;
        let body = join_chunks(&first_line, &child_md);
        if body.is_empty() {
            return Ok(String::new());
        }
        Ok(quote_lines(&body))
    }

    fn format_callout(&self, b: &CalloutBlock, context: FormatContext) -> Result<String, AppError> {
        let text = rich_text_to_markdown(&b.content.rich_text);
        let line = match &b.icon {
            Some(emoji) => format!("{} {}\n", emoji, text),
            None => format!("{}\n", text),
        };
        self.format_quoted(line, &b.common.children, context)
    }

    fn format_code_block(&self, code: &CodeBlock) -> String {
        let source: String = code
            .content
            .rich_text
            .iter()
            .map(|item| item.plain_text.as_str())
            .collect();
        let fence = "`".repeat(longest_backtick_run(&source).max(2) + 1);

        let mut result = format!("{}{}\n{}\n{}\n", fence, code.language, source, fence);
        if !code.caption.is_empty() {
            result.push_str(&format!("*{}*\n", rich_text_to_markdown(&code.caption)));
        }
        result
    }

    fn format_media(&self, b: &MediaBlock) -> String {
        let caption = plain_text_of(&b.caption);
        let label = if caption.trim().is_empty() {
            b.kind.default_label().to_string()
        } else {
            caption
        };
        match b.kind {
            MediaKind::Image => format!("![{}]({})\n", label, b.url),
            _ => format!("[{}]({})\n", label, b.url),
        }
    }

    fn format_web_link(&self, b: &WebLinkBlock) -> String {
        let caption = rich_text_to_markdown(&b.caption);
        let label = if caption.trim().is_empty() {
            b.url.as_str()
        } else {
            caption.as_str()
        };
        format!("[{}]({})\n", label, b.url)
    }

    fn format_child_page(&self, b: &ChildBlock, context: FormatContext) -> Result<String, AppError> {
        if !self.settings.parse_child_pages {
            return Ok(format!("[{}]({})\n", title_or(&b.title, "Untitled"), page_url(&b.common.id)));
        }
        if self.settings.separate_child_pages {
            return Ok(String::new());
        }
        let heading = format!("# {}\n", title_or(&b.title, "Untitled"));
        let child_md = self.format_children(&b.common.children, context)?;
        Ok(join_chunks(&heading, &child_md))
    }

    /// GFM table with a header separator after the first row.
    fn format_table(&self, b: &TableBlock) -> String {
        let rows: Vec<&TableRowBlock> = b
            .common
            .children
            .iter()
            .filter_map(|child| match child {
                Block::TableRow(row) => Some(row),
                _ => None,
            })
            .collect();

        if rows.is_empty() {
            return String::new();
        }

        let width = rows
            .iter()
            .map(|row| row.cells.len())
            .max()
            .unwrap_or(0)
            .max(b.table_width);

        let mut result = String::new();
        for (index, row) in rows.iter().enumerate() {
            result.push_str(&format_table_row(&row.cells, width));
            if index == 0 {
                result.push('|');
                result.push_str(&" --- |".repeat(width));
                result.push('\n');
            }
        }
        result
    }

    /// Linked list of every heading in the document.
    fn generate_table_of_contents(&self) -> String {
        let mut entries = Vec::new();
        collect_headings(self.document_blocks, &mut entries);

        let mut result = String::new();
        for entry in entries {
            let indent = "  ".repeat((entry.level as usize).saturating_sub(1));
            result.push_str(&format!(
                "{}- [{}](#{})\n",
                indent,
                entry.text,
                anchor_slug(&entry.text)
            ));
        }
        result
    }
}

impl BlockRenderer for MarkdownBlockRenderer<'_> {
    fn render_block(
        &self,
        block: &Block,
        context: FormatContext,
    ) -> Result<BlockRenderResult, AppError> {
        if context.depth_limit_reached() {
            return Err(AppError::RecursionLimitExceeded(BLOCK_MAX_RENDER_DEPTH));
        }

        let content = match block {
            Block::Paragraph(b) => {
                self.format_text_block(&b.content, "", &b.common.children, context)?
            }
            Block::Heading(b) => self.format_heading(b, context)?,
            Block::BulletedListItem(b) => {
                self.format_list_item(&b.content, "- ", &b.common.children, context)?
            }
            Block::NumberedListItem(b) => {
                let marker = format!("{}. ", context.current_list_number());
                self.format_list_item(&b.content, &marker, &b.common.children, context)?
            }
            Block::ToDo(b) => self.format_todo(b, context)?,
            Block::Toggle(b) => self.format_toggle(b, context)?,
            Block::Quote(b) => {
                let line = self.text_line(&b.content, "").unwrap_or_default();
                self.format_quoted(line, &b.common.children, context)?
            }
            Block::Callout(b) => self.format_callout(b, context)?,
            Block::Code(b) => self.format_code_block(b),
            Block::Equation(b) => format!("$$\n{}\n$$\n", b.expression),
            Block::Divider(_) => "---\n".to_string(),
            Block::Breadcrumb(_) => String::new(),
            Block::TableOfContents(_) => self.generate_table_of_contents(),
            Block::Media(b) => self.format_media(b),
            Block::WebLink(b) => self.format_web_link(b),
            Block::ChildPage(b) => self.format_child_page(b, context)?,
            Block::ChildDatabase(b) => format!(
                "[{}]({})\n",
                title_or(&b.title, "Untitled database"),
                page_url(&b.common.id)
            ),
            Block::LinkToPage(b) => format!("[Linked page]({})\n", page_url(&b.page_id)),
            Block::Table(b) => self.format_table(b),
            Block::TableRow(b) => format_table_row(&b.cells, b.cells.len()),
            Block::ColumnList(_) | Block::Column(_) | Block::Synced(_) => {
                self.format_children(block.children(), context)?
            }
            Block::Unsupported(b) => {
                log::debug!("Skipping unsupported block type {}", b.block_type);
                String::new()
            }
        };

        let context = match block {
            Block::NumberedListItem(_) => context.next_list_number(),
            _ => context,
        };

        Ok(BlockRenderResult { content, context })
    }
}

// --- Helpers ---

/// Joins two chunks with a blank line, skipping empty ones.
fn join_chunks(first: &str, second: &str) -> String {
    match (first.is_empty(), second.is_empty()) {
        (true, _) => second.to_string(),
        (_, true) => first.to_string(),
        _ => format!("{}\n{}", first, second),
    }
}

/// Indents each non-empty line of `text` by `indent`, preserving blank lines.
fn indent_block_content(text: &str, indent: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                line.to_string()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}

/// Keeps multi-line list text inside its list item.
fn continuation_lines(text: &str, indent: &str) -> String {
    text.replace('\n', &format!("\n{}", indent))
}

fn quote_lines(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}

fn format_table_row(cells: &[Vec<RichTextItem>], width: usize) -> String {
    let mut row = String::from("|");
    for index in 0..width {
        let content = cells
            .get(index)
            .map(|cell| rich_text_to_markdown(cell))
            .unwrap_or_default();
        let content = content.replace('|', "\\|").replace('\n', "<br>");
        row.push_str(&format!(" {} |", content));
    }
    row.push('\n');
    row
}

fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

fn collect_headings(blocks: &[Block], entries: &mut Vec<TocEntry>) {
    for block in blocks {
        if let Block::Heading(h) = block {
            let text = plain_text_of(&h.content.rich_text);
            if !text.trim().is_empty() {
                entries.push(TocEntry {
                    level: h.level,
                    text: text.trim().to_string(),
                });
            }
        }
        collect_headings(block.children(), entries);
    }
}

fn page_url(id: &BlockId) -> String {
    format!("{}/{}", NOTION_PAGE_BASE_URL, id.as_str())
}

fn title_or<'t>(title: &'t str, fallback: &'t str) -> &'t str {
    if title.trim().is_empty() {
        fallback
    } else {
        title
    }
}

/// Anchor id for a heading, as linked from the table of contents.
///
/// Lowercase alphanumerics with whitespace turned into hyphens; everything
/// else is dropped.
pub fn anchor_slug(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(c)
            } else if c.is_whitespace() {
                Some('-')
            } else {
                None
            }
        })
        .collect::<String>()
        .trim_matches('-')
        .to_string()
}
