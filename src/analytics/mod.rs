// src/analytics/mod.rs
//! Content measurement for fetched block trees.

use crate::model::Block;

/// Quick statistics for progress and diagnostic log lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSummary {
    pub total_blocks: usize,
    pub deepest_nesting: usize,
    pub child_pages: usize,
    pub unsupported_blocks: usize,
}

/// Measures a block tree. Top-level blocks sit at nesting level 1.
pub fn measure_blocks(blocks: &[Block]) -> ContentSummary {
    let mut summary = ContentSummary::default();
    walk(&mut summary, blocks, 1);
    summary
}

fn walk(summary: &mut ContentSummary, blocks: &[Block], depth: usize) {
    for block in blocks {
        summary.total_blocks += 1;
        summary.deepest_nesting = summary.deepest_nesting.max(depth);
        match block {
            Block::ChildPage(_) => summary.child_pages += 1,
            Block::Unsupported(_) => summary.unsupported_blocks += 1,
            _ => {}
        }
        walk(summary, block.children(), depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockCommon, ChildBlock, TextBlock, TextBlockContent};

    #[test]
    fn test_measures_nested_tree() {
        let page = Block::ChildPage(ChildBlock {
            common: BlockCommon::default().with_children(vec![Block::Paragraph(
                TextBlock {
                    common: BlockCommon::default(),
                    content: TextBlockContent::plain("deep"),
                },
            )]),
            title: "Child".to_string(),
        });
        let top = Block::Paragraph(TextBlock::default());

        let summary = measure_blocks(&[top, page]);

        assert_eq!(
            summary,
            ContentSummary {
                total_blocks: 3,
                deepest_nesting: 2,
                child_pages: 1,
                unsupported_blocks: 0,
            }
        );
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(measure_blocks(&[]), ContentSummary::default());
    }
}
