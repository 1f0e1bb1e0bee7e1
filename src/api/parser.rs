// src/api/parser.rs
//! Response parsing on top of notion-client's serde types.

use super::client::ApiResponse;
use super::responses::{NotionError, PaginatedResponse, RetrieveBlockChildrenResponse};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionClientError, NotionErrorCode};
use crate::model::Block;
use reqwest::StatusCode;

/// Parse any Notion API response, turning error bodies into typed errors.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        parse_error(&result.data, result.status, &result.url)
    }
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        NotionClientError::Deserialization {
            source: e,
            body: preview(body),
        }
        .into()
    })
}

fn parse_error<T>(body: &str, status: StatusCode, url: &str) -> Result<T, AppError> {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        return Err(NotionClientError::NotionApi {
            status: notion_error.status,
            code: notion_error.code,
            message: notion_error.message,
            request_id: notion_error.request_id,
        }
        .into());
    }

    Err(AppError::NotionService {
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}: {}", status, url, preview(body)),
        status,
    })
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let head: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}

/// Parse one page of `GET /blocks/{id}/children` into domain blocks.
pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, AppError> {
    let response: RetrieveBlockChildrenResponse = parse_api_response(result)?;
    let object = response.object.clone();
    let next_cursor = response.next_cursor.clone();
    let has_more = response.has_more;

    Ok(PaginatedResponse {
        object,
        results: response.into_domain_blocks()?,
        next_cursor,
        has_more,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> ApiResponse<String> {
        ApiResponse {
            data: body.to_string(),
            status: StatusCode::from_u16(status).unwrap(),
            url: "https://api.notion.com/v1/blocks/abc/children".to_string(),
        }
    }

    #[test]
    fn test_notion_error_body_becomes_typed_error() {
        let body = r#"{
            "object": "error",
            "status": 404,
            "code": "object_not_found",
            "message": "Could not find block with ID: abc123",
            "request_id": "req_123"
        }"#;

        let result = parse_blocks_pagination(response(404, body));

        match result {
            Err(AppError::NotionClient(NotionClientError::NotionApi { code, status, .. })) => {
                assert_eq!(code, "object_not_found");
                assert_eq!(status, 404);
            }
            other => panic!("Expected NotionClientError::NotionApi, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_error_body_falls_back_to_http_status() {
        let result = parse_blocks_pagination(response(502, "<html>Bad gateway</html>"));

        match result {
            Err(AppError::NotionService { code, .. }) => {
                assert_eq!(code, NotionErrorCode::HttpStatus(502));
            }
            other => panic!("Expected AppError::NotionService, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_success_body_is_a_deserialization_error() {
        let result = parse_blocks_pagination(response(200, "{\"object\": \"list\""));
        assert!(matches!(
            result,
            Err(AppError::NotionClient(NotionClientError::Deserialization { .. }))
        ));
    }

    #[test]
    fn test_long_bodies_are_truncated_in_previews() {
        let long = "x".repeat(ERROR_BODY_PREVIEW_LENGTH + 50);
        let shown = preview(&long);
        assert_eq!(shown.len(), ERROR_BODY_PREVIEW_LENGTH + 3);
        assert!(shown.ends_with("..."));
    }
}
