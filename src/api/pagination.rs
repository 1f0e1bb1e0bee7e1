// src/api/pagination.rs
//! Cursor pagination over Notion list endpoints.

use super::responses::PaginatedResponse;
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;

/// All items collected from a paginated endpoint.
#[derive(Debug, Clone)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub total_fetched: usize,
    pub pages_fetched: u32,
}

/// Fetches every page of results by following `next_cursor`.
///
/// `fetch_fn` receives the page size and the cursor of the page to fetch
/// (`None` for the first one). Stops when Notion reports no more results,
/// when no cursor is returned, or after `max_pages` requests.
pub async fn fetch_all_pages<T, F, Fut>(
    mut fetch_fn: F,
    max_pages: Option<u32>,
) -> Result<PaginationResult<T>, AppError>
where
    F: FnMut(u32, Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut all_items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;

    loop {
        if let Some(max) = max_pages {
            if pages_fetched >= max {
                log::debug!("Reached maximum page limit: {}", max);
                break;
            }
        }

        let response = fetch_fn(NOTION_API_PAGE_SIZE as u32, cursor).await?;

        cursor = response.next_cursor;
        all_items.extend(response.results);
        pages_fetched += 1;

        if !response.has_more || cursor.is_none() {
            break;
        }
    }

    Ok(PaginationResult {
        total_fetched: all_items.len(),
        items: all_items,
        pages_fetched,
    })
}
