// src/api/notion_client_adapter.rs
//! Adapter layer for converting notion-client types to our domain model.
//!
//! Only what the Markdown converter consumes survives the conversion:
//! text runs, annotations, links, media URLs and the block tree shape.
//! Colors and user metadata are dropped here.

use crate::error::{AppError, NotionClientError};
use crate::model::blocks::*;
use crate::model::common::BlockCommon;
use crate::model::Block;
use crate::types::{Annotations, BlockId, EquationData, Link, RichTextItem, RichTextType};

/// Convert a notion-client Block to our domain Block
pub fn convert_block(
    notion_block: notion_client::objects::block::Block,
) -> Result<Block, AppError> {
    let common = convert_block_common(&notion_block)?;

    use notion_client::objects::block::BlockType;

    match notion_block.block_type {
        BlockType::Paragraph { paragraph } => Ok(Block::Paragraph(TextBlock {
            common,
            content: convert_text(paragraph.rich_text)?,
        })),

        BlockType::Heading1 { heading_1 } => Ok(heading(common, 1, heading_1.rich_text)?),
        BlockType::Heading2 { heading_2 } => Ok(heading(common, 2, heading_2.rich_text)?),
        BlockType::Heading3 { heading_3 } => Ok(heading(common, 3, heading_3.rich_text)?),

        BlockType::BulletedListItem { bulleted_list_item } => {
            Ok(Block::BulletedListItem(TextBlock {
                common,
                content: convert_text(bulleted_list_item.rich_text)?,
            }))
        }

        BlockType::NumberedListItem { numbered_list_item } => {
            Ok(Block::NumberedListItem(TextBlock {
                common,
                content: convert_text(numbered_list_item.rich_text)?,
            }))
        }

        BlockType::ToDo { to_do } => Ok(Block::ToDo(ToDoBlock {
            common,
            content: convert_text(to_do.rich_text)?,
            checked: to_do.checked.unwrap_or(false),
        })),

        BlockType::Toggle { toggle } => Ok(Block::Toggle(TextBlock {
            common,
            content: convert_text(toggle.rich_text)?,
        })),

        BlockType::Quote { quote } => Ok(Block::Quote(TextBlock {
            common,
            content: convert_text(quote.rich_text)?,
        })),

        BlockType::Callout { callout } => Ok(Block::Callout(CalloutBlock {
            common,
            icon: callout.icon.and_then(convert_icon),
            content: convert_text(callout.rich_text)?,
        })),

        BlockType::Code { code } => Ok(Block::Code(CodeBlock {
            common,
            language: normalize_language(&format!("{:?}", code.language)),
            caption: convert_rich_text_array(code.caption)?,
            content: convert_text(code.rich_text)?,
        })),

        BlockType::Equation { equation } => Ok(Block::Equation(EquationBlock {
            common,
            expression: equation.expression,
        })),

        BlockType::Divider { .. } => Ok(Block::Divider(MarkerBlock { common })),
        BlockType::Breadcrumb { .. } => Ok(Block::Breadcrumb(MarkerBlock { common })),
        BlockType::TableOfContents { .. } => Ok(Block::TableOfContents(MarkerBlock { common })),
        BlockType::ColumnList { .. } => Ok(Block::ColumnList(MarkerBlock { common })),
        BlockType::Column { .. } => Ok(Block::Column(MarkerBlock { common })),

        BlockType::Image { image } => Ok(Block::Media(MediaBlock {
            common,
            kind: MediaKind::Image,
            url: file_url(image.file_type),
            caption: Vec::new(),
        })),

        BlockType::Video { video } => Ok(Block::Media(MediaBlock {
            common,
            kind: MediaKind::Video,
            url: file_url(video.file_type),
            caption: Vec::new(),
        })),

        BlockType::File { file } => Ok(Block::Media(MediaBlock {
            common,
            kind: MediaKind::File,
            url: file_url(file.file_type),
            caption: convert_rich_text_array(file.caption)?,
        })),

        BlockType::Pdf { pdf } => Ok(Block::Media(MediaBlock {
            common,
            kind: MediaKind::Pdf,
            url: file_url(pdf.file_type),
            caption: convert_rich_text_array(pdf.caption)?,
        })),

        BlockType::Bookmark { bookmark } => Ok(Block::WebLink(WebLinkBlock {
            common,
            kind: WebLinkKind::Bookmark,
            url: bookmark.url,
            caption: convert_rich_text_array(bookmark.caption)?,
        })),

        BlockType::Embed { embed } => Ok(Block::WebLink(WebLinkBlock {
            common,
            kind: WebLinkKind::Embed,
            url: embed.url,
            caption: Vec::new(),
        })),

        BlockType::LinkPreview { link_preview } => Ok(Block::WebLink(WebLinkBlock {
            common,
            kind: WebLinkKind::LinkPreview,
            url: link_preview.url,
            caption: Vec::new(),
        })),

        BlockType::ChildPage { child_page } => Ok(Block::ChildPage(ChildBlock {
            common,
            title: child_page.title,
        })),

        BlockType::ChildDatabase { child_database } => Ok(Block::ChildDatabase(ChildBlock {
            common,
            title: child_database.title,
        })),

        BlockType::LinkToPage { link_to_page } => match link_to_page {
            notion_client::objects::parent::Parent::PageId { page_id } => {
                Ok(Block::LinkToPage(LinkToPageBlock {
                    common,
                    page_id: BlockId::parse(&page_id)?,
                }))
            }
            _ => Err(NotionClientError::ConversionError {
                message: "LinkToPage block must point at a page".to_string(),
            }
            .into()),
        },

        BlockType::Table { table } => Ok(Block::Table(TableBlock {
            common,
            table_width: table.table_width as usize,
            has_column_header: table.has_column_header,
        })),

        BlockType::TableRow { table_row } => Ok(Block::TableRow(TableRowBlock {
            common,
            cells: table_row
                .cells
                .into_iter()
                .map(convert_rich_text_array)
                .collect::<Result<Vec<_>, _>>()?,
        })),

        BlockType::SyncedBlock { synced_block } => {
            let synced_from = match synced_block.synced_from {
                Some(notion_client::objects::block::SyncedFrom::BlockId { block_id }) => {
                    BlockId::parse(&block_id)
                        .map_err(|_| log::warn!("Ignoring invalid synced_from id '{}'", block_id))
                        .ok()
                }
                None => None,
            };
            Ok(Block::Synced(SyncedBlock {
                common,
                synced_from,
            }))
        }

        other => Ok(Block::Unsupported(UnsupportedBlock {
            common,
            block_type: format!("{:?}", other),
        })),
    }
}

fn heading(
    common: BlockCommon,
    level: u8,
    rich_text: Vec<notion_client::objects::rich_text::RichText>,
) -> Result<Block, AppError> {
    Ok(Block::Heading(HeadingBlock {
        common,
        level,
        content: convert_text(rich_text)?,
    }))
}

fn convert_block_common(
    notion_block: &notion_client::objects::block::Block,
) -> Result<BlockCommon, AppError> {
    let id = BlockId::parse(notion_block.id.as_deref().ok_or_else(|| {
        NotionClientError::ConversionError {
            message: "Block missing required ID field".to_string(),
        }
    })?)?;

    Ok(BlockCommon {
        id,
        children: Vec::new(),
        has_children: notion_block.has_children.unwrap_or(false),
    })
}

fn convert_text(
    rich_text: Vec<notion_client::objects::rich_text::RichText>,
) -> Result<TextBlockContent, AppError> {
    Ok(TextBlockContent::new(convert_rich_text_array(rich_text)?))
}

fn convert_rich_text_array(
    rich_texts: Vec<notion_client::objects::rich_text::RichText>,
) -> Result<Vec<RichTextItem>, AppError> {
    rich_texts.into_iter().map(convert_rich_text).collect()
}

fn convert_rich_text(
    rich_text: notion_client::objects::rich_text::RichText,
) -> Result<RichTextItem, AppError> {
    use notion_client::objects::rich_text::RichText as NcRichText;

    match rich_text {
        NcRichText::Text {
            text,
            annotations,
            plain_text,
            href,
        } => {
            let plain_text = plain_text.unwrap_or_else(|| text.content.clone());
            Ok(RichTextItem {
                text_type: RichTextType::Text {
                    content: text.content,
                    link: text.link.map(|link| Link { url: link.url }),
                },
                annotations: convert_annotations(annotations.unwrap_or_default()),
                plain_text,
                href,
            })
        }

        NcRichText::Mention {
            annotations,
            plain_text,
            href,
            ..
        } => Ok(RichTextItem {
            text_type: RichTextType::Mention { url: href.clone() },
            annotations: convert_annotations(annotations),
            plain_text,
            href,
        }),

        NcRichText::Equation {
            equation,
            annotations,
            plain_text,
            href,
        } => Ok(RichTextItem {
            text_type: RichTextType::Equation(EquationData {
                expression: equation.expression,
            }),
            annotations: convert_annotations(annotations),
            plain_text,
            href,
        }),

        _ => {
            log::debug!("Dropping unsupported rich text item");
            Ok(RichTextItem::plain_text(""))
        }
    }
}

fn convert_annotations(annotations: notion_client::objects::rich_text::Annotations) -> Annotations {
    Annotations {
        bold: annotations.bold,
        italic: annotations.italic,
        strikethrough: annotations.strikethrough,
        underline: annotations.underline,
        code: annotations.code,
    }
}

fn file_url(file: notion_client::objects::file::File) -> String {
    use notion_client::objects::file::File as NcFile;

    match file {
        NcFile::External { external } => external.url,
        NcFile::File { file } => file.url,
    }
}

/// Only emoji icons have a textual form.
fn convert_icon(icon: notion_client::objects::block::Icon) -> Option<String> {
    use notion_client::objects::block::Icon as NcIcon;

    match icon {
        NcIcon::Emoji(notion_client::objects::emoji::Emoji::Emoji { emoji }) => Some(emoji),
        NcIcon::File(_) => None,
    }
}

/// Turns a notion-client language name (`"JavaScript"`, `"PlainText"`,
/// `"CPlusPlus"`) into a fence info string.
pub fn normalize_language(raw: &str) -> String {
    let collapsed: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect();

    match collapsed.as_str() {
        "plaintext" | "plain" => String::new(),
        "cplusplus" | "c++" => "cpp".to_string(),
        "shell" => "bash".to_string(),
        _ => collapsed,
    }
}
