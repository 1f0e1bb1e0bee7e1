// src/formatting/block_renderer.rs
//! Block rendering engine: converts block trees to Markdown documents.

use super::pure_visitor::{BlockRenderer, MarkdownBlockRenderer};
use super::state::FormatContext;
use super::{ConversionSettings, ConvertedMarkdown};
use crate::constants::CHARS_PER_BLOCK_ESTIMATE;
use crate::error::AppError;
use crate::model::Block;
use indexmap::IndexMap;

/// Renders a slice of blocks into Markdown.
pub fn render_blocks(blocks: &[Block], settings: &ConversionSettings) -> Result<String, AppError> {
    let renderer = MarkdownBlockRenderer::new(settings, blocks);
    log::debug!("Rendering {} top-level blocks", blocks.len());
    render_sequence(&renderer, blocks, FormatContext::new())
}

/// Renders sibling blocks, threading context through them.
///
/// Chunks are separated by a blank line except between consecutive list
/// items, which stay in one Markdown list. Numbering restarts whenever a
/// run of numbered items is interrupted.
pub fn render_sequence(
    renderer: &dyn BlockRenderer,
    blocks: &[Block],
    context: FormatContext,
) -> Result<String, AppError> {
    let mut output = String::with_capacity(blocks.len() * CHARS_PER_BLOCK_ESTIMATE);
    let mut context = context;
    let mut previous: Option<&Block> = None;

    for block in blocks {
        if !matches!(block, Block::NumberedListItem(_)) {
            context = context.restart_list();
        }

        let result = renderer.render_block(block, context)?;
        context = result.context;

        if result.content.is_empty() {
            continue;
        }

        if let Some(prev) = previous {
            if !(prev.is_list_item() && block.is_list_item()) {
                output.push('\n');
            }
        }
        output.push_str(&result.content);
        previous = Some(block);
    }

    Ok(output)
}

/// Converts a page's block tree into Markdown sections.
///
/// The parent section always holds the page itself. Child pages get their
/// own sections only when they are parsed and kept separate.
pub fn convert_blocks(
    blocks: &[Block],
    settings: &ConversionSettings,
) -> Result<ConvertedMarkdown, AppError> {
    let parent = render_blocks(blocks, settings)?;

    let mut children = IndexMap::new();
    if settings.parse_child_pages && settings.separate_child_pages {
        collect_child_pages(blocks, settings, &mut children)?;
        log::debug!("Collected {} separate child page section(s)", children.len());
    }

    Ok(ConvertedMarkdown::Sections { parent, children })
}

fn collect_child_pages(
    blocks: &[Block],
    settings: &ConversionSettings,
    sections: &mut IndexMap<String, String>,
) -> Result<(), AppError> {
    for block in blocks {
        if let Block::ChildPage(page) = block {
            let content = render_blocks(block.children(), settings)?;
            sections.insert(unique_title(sections, &page.title), content);
        }
        collect_child_pages(block.children(), settings, sections)?;
    }
    Ok(())
}

/// Suffixes repeated titles with a counter: `Notes`, `Notes (2)`, ...
fn unique_title(sections: &IndexMap<String, String>, title: &str) -> String {
    let base = if title.trim().is_empty() {
        "Untitled"
    } else {
        title
    };
    if !sections.contains_key(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{} ({})", base, n))
        .find(|candidate| !sections.contains_key(candidate))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use crate::types::BlockId;
    use pretty_assertions::assert_eq;

    fn common(children: Vec<Block>) -> BlockCommon {
        BlockCommon::new(BlockId::new_v4()).with_children(children)
    }

    fn paragraph(text: &str) -> Block {
        Block::Paragraph(TextBlock {
            common: common(vec![]),
            content: TextBlockContent::plain(text),
        })
    }

    fn numbered(text: &str) -> Block {
        Block::NumberedListItem(TextBlock {
            common: common(vec![]),
            content: TextBlockContent::plain(text),
        })
    }

    fn heading(level: u8, text: &str) -> Block {
        Block::Heading(HeadingBlock {
            common: common(vec![]),
            level,
            content: TextBlockContent::plain(text),
        })
    }

    fn child_page(title: &str, children: Vec<Block>) -> Block {
        Block::ChildPage(ChildBlock {
            common: common(children),
            title: title.to_string(),
        })
    }

    #[test]
    fn test_numbered_list_counter_increments() {
        let blocks = vec![numbered("First item"), numbered("Second item"), numbered("Third item")];

        let output = render_blocks(&blocks, &ConversionSettings::default()).unwrap();

        assert_eq!(output, "1. First item\n2. Second item\n3. Third item\n");
    }

    #[test]
    fn test_numbering_restarts_after_interruption() {
        let blocks = vec![numbered("One"), numbered("Two"), paragraph("Break"), numbered("Again")];

        let output = render_blocks(&blocks, &ConversionSettings::default()).unwrap();

        assert_eq!(output, "1. One\n2. Two\n\nBreak\n\n1. Again\n");
    }

    #[test]
    fn test_blocks_are_separated_by_blank_lines() {
        let blocks = vec![heading(1, "Title"), paragraph("First"), paragraph("Second")];

        let output = render_blocks(&blocks, &ConversionSettings::default()).unwrap();

        assert_eq!(output, "# Title\n\nFirst\n\nSecond\n");
    }

    #[test]
    fn test_empty_blocks_leave_no_gaps() {
        let blocks = vec![paragraph("Before"), paragraph(""), paragraph("After")];

        let output = render_blocks(&blocks, &ConversionSettings::default()).unwrap();

        assert_eq!(output, "Before\n\nAfter\n");
    }

    #[test]
    fn test_table_of_contents_generation() {
        let blocks = vec![
            Block::TableOfContents(MarkerBlock::default()),
            heading(1, "Introduction"),
            heading(2, "Overview"),
            heading(1, "Main Content"),
        ];

        let output = render_blocks(&blocks, &ConversionSettings::default()).unwrap();

        assert!(output.starts_with(
            "- [Introduction](#introduction)\n  - [Overview](#overview)\n- [Main Content](#main-content)\n"
        ));
    }

    #[test]
    fn test_child_pages_inline_by_default() {
        let blocks = vec![
            paragraph("Intro"),
            child_page("Sub", vec![paragraph("Inside")]),
        ];

        let converted = convert_blocks(&blocks, &ConversionSettings::default()).unwrap();

        assert_eq!(
            converted,
            ConvertedMarkdown::Sections {
                parent: "Intro\n\n# Sub\n\nInside\n".to_string(),
                children: IndexMap::new(),
            }
        );
    }

    #[test]
    fn test_child_pages_separated_into_sections() {
        let settings = ConversionSettings {
            separate_child_pages: true,
            ..ConversionSettings::default()
        };
        let blocks = vec![
            paragraph("Intro"),
            child_page("Notes", vec![paragraph("A")]),
            child_page("Notes", vec![child_page("Deep", vec![paragraph("B")])]),
        ];

        let converted = convert_blocks(&blocks, &settings).unwrap();

        let ConvertedMarkdown::Sections { parent, children } = converted else {
            panic!("expected sections");
        };
        assert_eq!(parent, "Intro\n");
        assert_eq!(
            children.keys().collect::<Vec<_>>(),
            vec!["Notes", "Notes (2)", "Deep"]
        );
        assert_eq!(children["Notes"], "A\n");
        assert_eq!(children["Notes (2)"], "");
        assert_eq!(children["Deep"], "B\n");
    }

    #[test]
    fn test_unparsed_child_pages_become_links() {
        let settings = ConversionSettings {
            parse_child_pages: false,
            ..ConversionSettings::default()
        };
        let page = child_page("Sub", vec![paragraph("Hidden")]);
        let expected = format!("[Sub](https://www.notion.so/{})\n", page.id().as_str());

        let output = render_blocks(&[page], &settings).unwrap();

        assert_eq!(output, expected);
    }
}
