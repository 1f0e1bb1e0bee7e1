// src/server/handlers.rs
//! Request handlers.

use super::page::converter_page_html;
use super::AppState;
use crate::export::ExportResult;
use crate::types::OutputMode;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Query of `GET /`.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    mode: Option<String>,
}

/// Body of `POST /api/export`.
#[derive(Debug, Default, Deserialize)]
pub struct ExportForm {
    #[serde(rename = "notionUrl")]
    notion_url: Option<String>,
    mode: Option<String>,
}

fn parse_mode(raw: Option<&str>) -> Result<OutputMode, crate::types::ValidationError> {
    match raw {
        None => Ok(OutputMode::default()),
        Some(raw) if raw.trim().is_empty() => Ok(OutputMode::default()),
        Some(raw) => raw.parse(),
    }
}

/// GET / - the converter form for the requested mode.
pub async fn converter_page(Query(query): Query<PageQuery>) -> Html<String> {
    let mode = parse_mode(query.mode.as_deref()).unwrap_or_else(|e| {
        log::debug!("{}; showing the Markdown form", e);
        OutputMode::default()
    });
    Html(converter_page_html(mode))
}

/// POST /api/export
pub async fn export(State(state): State<Arc<AppState>>, Form(form): Form<ExportForm>) -> Response {
    let mode = match parse_mode(form.mode.as_deref()) {
        Ok(mode) => mode,
        Err(e) => {
            log::warn!("Rejected export request: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ExportResult::failure(OutputMode::default(), e.to_string())),
            )
                .into_response();
        }
    };

    let result = state.export.export(form.notion_url.as_deref(), mode).await;
    Json(result).into_response()
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
