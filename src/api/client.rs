// src/api/client.rs
//! Thin HTTP client for the Notion API.
//!
//! Handles authentication and request/response plumbing only. Parsing
//! lives in `parser`, pagination in `pagination`.

use crate::constants::{NOTION_API_BASE_URL, NOTION_API_VERSION};
use crate::error::AppError;
use crate::model::Block;
use crate::types::ApiKey;
use reqwest::{header, Client, Response};

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: String,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        Self::with_base_url(api_key, NOTION_API_BASE_URL)
    }

    /// Creates a client that talks to a different API root (used by tests
    /// and proxies).
    pub fn with_base_url(api_key: &ApiKey, base_url: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_API_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to `endpoint` (relative to the API root) with
    /// the given query parameters.
    pub async fn get(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("GET {} {:?}", url, query);

        let response = self.client.get(url).query(query).send().await?;
        log::debug!("{} -> {}", endpoint, response.status());

        Ok(response)
    }
}

#[async_trait::async_trait]
impl super::NotionRepository for NotionHttpClient {
    async fn retrieve_children(&self, parent_id: &str) -> Result<Vec<Block>, AppError> {
        let endpoint = format!("blocks/{}/children", parent_id);
        let result = super::pagination::fetch_all_pages(
            |page_size, cursor| {
                let endpoint = endpoint.clone();
                async move {
                    let mut query = vec![("page_size", page_size.to_string())];
                    if let Some(cursor) = cursor {
                        query.push(("start_cursor", cursor));
                    }
                    let response = self.get(&endpoint, &query).await?;
                    let result = extract_response_text(response).await?;
                    super::parser::parse_blocks_pagination(result)
                }
            },
            None,
        )
        .await?;

        log::debug!(
            "Fetched {} child blocks of {} in {} request(s)",
            result.total_fetched,
            parent_id,
            result.pages_fetched
        );
        Ok(result.items)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
