// src/pipeline.rs
//! The content stage of an export: Notion page in, one Markdown document out.

use crate::analytics::measure_blocks;
use crate::api::{fetch_block_tree, FetchOptions, NotionHttpClient, NotionRepository};
use crate::error::AppError;
use crate::formatting::{assemble_document, convert_blocks, ConversionSettings};
use crate::types::{ApiKey, PageReference};

/// Retrieves a Notion page as a single Markdown document.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_markdown(&self, page: &PageReference) -> Result<String, AppError>;
}

/// Fetches pages through the Notion API.
///
/// A fresh HTTP client is built for every call from the configured key.
#[derive(Debug, Clone)]
pub struct NotionContentSource {
    api_key: ApiKey,
    base_url: Option<String>,
    settings: ConversionSettings,
    fetch_options: FetchOptions,
}

impl NotionContentSource {
    pub fn new(api_key: ApiKey, settings: ConversionSettings) -> Self {
        let fetch_options = FetchOptions {
            include_child_pages: settings.parse_child_pages,
            ..FetchOptions::default()
        };
        Self {
            api_key,
            base_url: None,
            settings,
            fetch_options,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_fetch_depth(mut self, max_depth: u8) -> Self {
        self.fetch_options = self.fetch_options.with_max_depth(max_depth);
        self
    }

    fn client(&self) -> Result<NotionHttpClient, AppError> {
        match &self.base_url {
            Some(base_url) => NotionHttpClient::with_base_url(&self.api_key, base_url),
            None => NotionHttpClient::new(&self.api_key),
        }
    }
}

#[async_trait::async_trait]
impl ContentSource for NotionContentSource {
    async fn fetch_markdown(&self, page: &PageReference) -> Result<String, AppError> {
        let client = self.client()?;
        page_markdown(&client, page, &self.settings, self.fetch_options).await
    }
}

/// Fetches the block tree of `page` from `repository` and reduces it to the
/// final Markdown document.
pub async fn page_markdown(
    repository: &dyn NotionRepository,
    page: &PageReference,
    settings: &ConversionSettings,
    fetch_options: FetchOptions,
) -> Result<String, AppError> {
    log::info!("Retrieving blocks for page {}", page);

    let blocks = fetch_block_tree(repository, &page.to_hyphenated(), fetch_options).await?;

    let summary = measure_blocks(&blocks);
    log::info!(
        "Retrieved {} blocks (deepest nesting {}, {} child pages)",
        summary.total_blocks,
        summary.deepest_nesting,
        summary.child_pages
    );
    if summary.unsupported_blocks > 0 {
        log::warn!(
            "{} unsupported block(s) will be left out of the export",
            summary.unsupported_blocks
        );
    }

    let converted = convert_blocks(&blocks, settings)?;
    Ok(assemble_document(converted, &settings.document_title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, BlockCommon, HeadingBlock, TextBlock, TextBlockContent};
    use crate::types::{BlockId, RichTextItem};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    struct SinglePage {
        blocks: Vec<Block>,
        requested: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl NotionRepository for SinglePage {
        async fn retrieve_children(&self, parent_id: &str) -> Result<Vec<Block>, AppError> {
            self.requested.lock().unwrap().push(parent_id.to_string());
            Ok(self.blocks.clone())
        }
    }

    fn id(n: u8) -> BlockId {
        BlockId::parse(&format!("{:032x}", n)).unwrap()
    }

    #[tokio::test]
    async fn test_page_markdown_prefixes_title() {
        let repository = SinglePage {
            blocks: vec![
                Block::Heading(HeadingBlock {
                    common: BlockCommon::new(id(1)),
                    level: 2,
                    content: TextBlockContent::new(vec![RichTextItem::plain_text("Intro")]),
                }),
                Block::Paragraph(TextBlock {
                    common: BlockCommon::new(id(2)),
                    content: TextBlockContent::new(vec![RichTextItem::plain_text("Hello")]),
                }),
            ],
            requested: Mutex::new(Vec::new()),
        };
        let page = PageReference::from_url(
            "https://www.notion.so/Page-0123456789abcdef0123456789abcdef",
        )
        .unwrap();

        let markdown = page_markdown(
            &repository,
            &page,
            &ConversionSettings::default(),
            FetchOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(markdown, "# Notion Export\n\n## Intro\n\nHello\n");
        assert_eq!(
            *repository.requested.lock().unwrap(),
            vec!["01234567-89ab-cdef-0123-456789abcdef".to_string()]
        );
    }

    #[tokio::test]
    async fn test_empty_page_has_no_title() {
        let repository = SinglePage {
            blocks: Vec::new(),
            requested: Mutex::new(Vec::new()),
        };
        let page = PageReference::from_url("abc").unwrap();

        let markdown = page_markdown(
            &repository,
            &page,
            &ConversionSettings::default(),
            FetchOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(markdown, "");
    }
}
