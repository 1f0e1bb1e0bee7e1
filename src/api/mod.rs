// src/api/mod.rs
//! Notion API interaction: retrieving a page's blocks.
//!
//! The HTTP client, response parsing and tree assembly are kept apart so
//! that everything above `NotionRepository` can be exercised without a
//! network.

pub mod client;
pub mod notion_client_adapter;
pub mod pagination;
pub mod parser;
mod responses;
pub mod tree;

use crate::error::AppError;
use crate::model::Block;

/// The ability to retrieve block content from a Notion workspace.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    /// All direct children of a page or block, across every result page.
    ///
    /// `parent_id` is passed through to Notion as given.
    async fn retrieve_children(&self, parent_id: &str) -> Result<Vec<Block>, AppError>;
}

pub use client::NotionHttpClient;
pub use responses::PaginatedResponse;
pub use tree::{fetch_block_tree, FetchOptions};
