// src/api/responses.rs
//! Wire types for Notion API responses.
//!
//! Block and error payloads come from notion-client's serde types; only the
//! list envelope is defined here.

use serde::{Deserialize, Serialize};

pub use notion_client::objects::{block::Block as NotionBlock, error::Error as NotionError};

/// Generic paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub object: String,
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// Block children response using notion-client types
pub type RetrieveBlockChildrenResponse = PaginatedResponse<NotionBlock>;

impl RetrieveBlockChildrenResponse {
    /// Convert all blocks to the domain model
    pub fn into_domain_blocks(self) -> Result<Vec<crate::model::Block>, crate::error::AppError> {
        self.results
            .into_iter()
            .map(super::notion_client_adapter::convert_block)
            .collect()
    }
}
