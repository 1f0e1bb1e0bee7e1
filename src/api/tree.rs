// src/api/tree.rs
//! Recursive assembly of a page's block tree.

use super::NotionRepository;
use crate::constants::{MAX_CONCURRENT_FETCHES, NOTION_MAX_FETCH_DEPTH};
use crate::error::AppError;
use crate::model::Block;
use futures::future::{try_join_all, BoxFuture};
use futures::FutureExt;
use tokio::sync::Semaphore;

/// Controls how far the tree fetch descends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Levels of children fetched below the page itself.
    pub max_depth: u8,
    /// Whether child pages are opened and their blocks fetched.
    pub include_child_pages: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_depth: NOTION_MAX_FETCH_DEPTH,
            include_child_pages: true,
        }
    }
}

impl FetchOptions {
    /// Clamps the requested depth to the safe maximum.
    pub fn with_max_depth(self, max_depth: u8) -> Self {
        let safe_depth = max_depth.min(NOTION_MAX_FETCH_DEPTH);
        if max_depth > safe_depth {
            log::warn!(
                "Requested fetch depth {} exceeds maximum safe depth {}. Clamping.",
                max_depth,
                safe_depth
            );
        }
        Self {
            max_depth: safe_depth,
            ..self
        }
    }
}

/// Fetches the children of `root_id` and, recursively, the children of
/// every block that reports having some.
///
/// Sibling subtrees are fetched concurrently, with at most
/// [`MAX_CONCURRENT_FETCHES`] requests in flight across the whole tree.
/// Any failure aborts the whole fetch; there is no partial result.
pub async fn fetch_block_tree(
    repository: &dyn NotionRepository,
    root_id: &str,
    options: FetchOptions,
) -> Result<Vec<Block>, AppError> {
    let limit = Semaphore::new(MAX_CONCURRENT_FETCHES);
    fetch_level(repository, &limit, root_id.to_string(), options, 1).await
}

fn fetch_level<'a>(
    repository: &'a dyn NotionRepository,
    limit: &'a Semaphore,
    parent_id: String,
    options: FetchOptions,
    depth: u8,
) -> BoxFuture<'a, Result<Vec<Block>, AppError>> {
    async move {
        let blocks = {
            // Held for the request only, never across the descent.
            let _permit = limit.acquire().await;
            repository.retrieve_children(&parent_id).await?
        };

        let descend = try_join_all(blocks.into_iter().map(|block| {
            fill_children(repository, limit, block, options, depth)
        }));
        descend.await
    }
    .boxed()
}

async fn fill_children(
    repository: &dyn NotionRepository,
    limit: &Semaphore,
    mut block: Block,
    options: FetchOptions,
    depth: u8,
) -> Result<Block, AppError> {
    if !block.has_children() {
        return Ok(block);
    }
    if matches!(block, Block::ChildPage(_)) && !options.include_child_pages {
        return Ok(block);
    }
    if matches!(block, Block::ChildDatabase(_)) {
        return Ok(block);
    }
    if depth >= options.max_depth {
        log::warn!(
            "Not descending into block {} at depth {}: maximum fetch depth reached",
            block.id(),
            depth
        );
        return Ok(block);
    }

    let children =
        fetch_level(repository, limit, block.id().to_hyphenated(), options, depth + 1).await?;
    block.set_children(children);
    Ok(block)
}
