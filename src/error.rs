// src/error.rs
//! Application error types.
//!
//! Every layer has its own vocabulary for failure: the Notion API reports
//! typed codes, the document renderer reports process failures, and the
//! application folds both into `AppError`. None of these ever reach a user
//! verbatim; the export action logs them and answers with a fixed message.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is not shared with the integration
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "validation_error" => Self::ValidationFailed,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether the integration could not see the resource at all.
    pub fn is_access_problem(&self) -> bool {
        matches!(
            self,
            Self::ObjectNotFound | Self::RestrictedResource | Self::HttpStatus(404)
        )
    }

    /// Whether the credentials themselves were rejected.
    pub fn is_auth_problem(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::HttpStatus(401))
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Notion API returned an error ({code}): {message}")]
    NotionService {
        code: NotionErrorCode,
        message: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Maximum recursion depth ({0}) exceeded")]
    RecursionLimitExceeded(usize),

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),

    #[error(transparent)]
    NotionClient(#[from] NotionClientError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl AppError {
    /// The Notion error code behind this failure, if Notion reported one.
    pub fn notion_code(&self) -> Option<NotionErrorCode> {
        match self {
            AppError::NotionService { code, .. } => Some(code.clone()),
            AppError::NotionClient(NotionClientError::NotionApi { code, .. }) => {
                Some(NotionErrorCode::from_api_response(code))
            }
            _ => None,
        }
    }
}

/// Notion client error mapping
#[derive(Error, Debug)]
pub enum NotionClientError {
    #[error("Failed to deserialize response: {source}\nBody: {body}")]
    Deserialization {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("Notion API error ({status}): {code} - {message}")]
    NotionApi {
        status: u32,
        code: String,
        message: String,
        request_id: Option<String>,
    },

    #[error("Type conversion error: {message}")]
    ConversionError { message: String },
}

/// Failures of the Markdown to PDF step.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to start renderer '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Renderer exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("Renderer did not finish within {0:?}")]
    TimedOut(Duration),

    #[error("Renderer reported success but produced no file at {0}")]
    MissingOutput(std::path::PathBuf),

    #[error("Filesystem IO error while rendering: {0}")]
    Io(#[from] std::io::Error),
}

/// Troubleshooting hints logged next to a failed export.
///
/// Only Notion failures get hints; other errors speak for themselves.
pub fn troubleshooting_hints(error: &AppError) -> Vec<&'static str> {
    let Some(code) = error.notion_code() else {
        return Vec::new();
    };

    let mut hints = Vec::new();
    if code.is_auth_problem() {
        hints.push("Check that NOTION_API_KEY holds a valid integration secret");
    }
    if code.is_access_problem() || code.is_auth_problem() {
        hints.push("Make sure the page is shared with your integration (Share > Invite)");
        hints.push("Verify the page ID in the URL is correct");
    }
    if hints.is_empty() {
        hints.push("Check the Notion API key and that the page is shared with the integration");
    }
    hints
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(code: &str) -> AppError {
        AppError::NotionClient(NotionClientError::NotionApi {
            status: 404,
            code: code.to_string(),
            message: "Could not find block".to_string(),
            request_id: None,
        })
    }

    #[test]
    fn test_error_code_round_trip_through_display() {
        let code = NotionErrorCode::from_api_response("object_not_found");
        assert_eq!(code, NotionErrorCode::ObjectNotFound);
        assert_eq!(code.to_string(), "object_not_found");
        assert_eq!(
            NotionErrorCode::from_api_response("brand_new"),
            NotionErrorCode::Unknown("brand_new".to_string())
        );
    }

    #[test]
    fn test_not_found_hints_mention_sharing() {
        let hints = troubleshooting_hints(&api_error("object_not_found"));
        assert!(hints.iter().any(|h| h.contains("shared with your integration")));
        assert!(hints.iter().any(|h| h.contains("page ID")));
    }

    #[test]
    fn test_unauthorized_hints_mention_api_key() {
        let hints = troubleshooting_hints(&api_error("unauthorized"));
        assert!(hints[0].contains("NOTION_API_KEY"));
    }

    #[test]
    fn test_non_notion_errors_have_no_hints() {
        let error = AppError::MalformedResponse("oops".to_string());
        assert!(troubleshooting_hints(&error).is_empty());
    }

    #[test]
    fn test_only_notion_api_errors_carry_a_code() {
        assert_eq!(
            api_error("rate_limited").notion_code(),
            Some(NotionErrorCode::RateLimited)
        );

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let undecodable = AppError::NotionClient(NotionClientError::Deserialization {
            source,
            body: "{".to_string(),
        });
        assert_eq!(undecodable.notion_code(), None);

        let conversion = AppError::NotionClient(NotionClientError::ConversionError {
            message: "unsupported block".to_string(),
        });
        assert!(troubleshooting_hints(&conversion).is_empty());
    }
}
