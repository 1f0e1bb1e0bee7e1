use super::blocks::*;
use super::common::BlockCommon;
use crate::types::BlockId;
use serde::{Deserialize, Serialize};

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Toggle($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Callout($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Equation($pattern) => $result,
            Block::Divider($pattern) => $result,
            Block::Breadcrumb($pattern) => $result,
            Block::TableOfContents($pattern) => $result,
            Block::Media($pattern) => $result,
            Block::WebLink($pattern) => $result,
            Block::ChildPage($pattern) => $result,
            Block::ChildDatabase($pattern) => $result,
            Block::LinkToPage($pattern) => $result,
            Block::Table($pattern) => $result,
            Block::TableRow($pattern) => $result,
            Block::ColumnList($pattern) => $result,
            Block::Column($pattern) => $result,
            Block::Synced($pattern) => $result,
            Block::Unsupported($pattern) => $result,
        }
    };
}

/// Block represents the Notion block types the exporter understands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(TextBlock),
    Heading(HeadingBlock),
    BulletedListItem(TextBlock),
    NumberedListItem(TextBlock),
    ToDo(ToDoBlock),
    Toggle(TextBlock),
    Quote(TextBlock),
    Callout(CalloutBlock),
    Code(CodeBlock),
    Equation(EquationBlock),
    Divider(MarkerBlock),
    Breadcrumb(MarkerBlock),
    TableOfContents(MarkerBlock),
    Media(MediaBlock),
    WebLink(WebLinkBlock),
    ChildPage(ChildBlock),
    ChildDatabase(ChildBlock),
    LinkToPage(LinkToPageBlock),
    Table(TableBlock),
    TableRow(TableRowBlock),
    ColumnList(MarkerBlock),
    Column(MarkerBlock),
    Synced(SyncedBlock),
    Unsupported(UnsupportedBlock),
}

impl Block {
    /// Get the block's ID
    pub fn id(&self) -> &BlockId {
        &self.common().id
    }

    /// Get the block's children
    pub fn children(&self) -> &[Block] {
        &self.common().children
    }

    /// Check if Notion reported children for this block
    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    /// Get common block data
    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    /// Get mutable common block data
    pub fn common_mut(&mut self) -> &mut BlockCommon {
        match_all_blocks!(self, b => &mut b.common)
    }

    /// Set children
    pub fn set_children(&mut self, children: Vec<Block>) {
        self.common_mut().children = children;
    }

    /// Whether this block is an item of a Markdown list run.
    pub fn is_list_item(&self) -> bool {
        matches!(
            self,
            Block::BulletedListItem(_) | Block::NumberedListItem(_) | Block::ToDo(_)
        )
    }

    /// Get block type name
    pub fn block_type(&self) -> &'static str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading(h) => match h.level {
                1 => "heading_1",
                2 => "heading_2",
                _ => "heading_3",
            },
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::ToDo(_) => "to_do",
            Block::Toggle(_) => "toggle",
            Block::Quote(_) => "quote",
            Block::Callout(_) => "callout",
            Block::Code(_) => "code",
            Block::Equation(_) => "equation",
            Block::Divider(_) => "divider",
            Block::Breadcrumb(_) => "breadcrumb",
            Block::TableOfContents(_) => "table_of_contents",
            Block::Media(m) => match m.kind {
                MediaKind::Image => "image",
                MediaKind::Video => "video",
                MediaKind::File => "file",
                MediaKind::Pdf => "pdf",
            },
            Block::WebLink(w) => match w.kind {
                WebLinkKind::Bookmark => "bookmark",
                WebLinkKind::Embed => "embed",
                WebLinkKind::LinkPreview => "link_preview",
            },
            Block::ChildPage(_) => "child_page",
            Block::ChildDatabase(_) => "child_database",
            Block::LinkToPage(_) => "link_to_page",
            Block::Table(_) => "table",
            Block::TableRow(_) => "table_row",
            Block::ColumnList(_) => "column_list",
            Block::Column(_) => "column",
            Block::Synced(_) => "synced_block",
            Block::Unsupported(_) => "unsupported",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_accessors() {
        let child = Block::Paragraph(TextBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::plain("child"),
        });
        let mut parent = Block::Toggle(TextBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::plain("parent"),
        });
        assert!(parent.children().is_empty());

        parent.set_children(vec![child.clone()]);
        assert_eq!(parent.children(), &[child]);
        assert_eq!(parent.block_type(), "toggle");
    }

    #[test]
    fn test_list_item_detection() {
        let bullet = Block::BulletedListItem(TextBlock::default());
        let todo = Block::ToDo(ToDoBlock::default());
        let paragraph = Block::Paragraph(TextBlock::default());
        assert!(bullet.is_list_item());
        assert!(todo.is_list_item());
        assert!(!paragraph.is_list_item());
    }
}
