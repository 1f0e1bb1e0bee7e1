// src/export.rs
//! The export action: URL in, Markdown text or a downloadable PDF out.

use crate::constants::{MESSAGE_MARKDOWN_FAILED, MESSAGE_PDF_FAILED, MESSAGE_URL_REQUIRED};
use crate::error::{troubleshooting_hints, AppError};
use crate::output::{ExportArtifacts, ExportWorkspace};
use crate::pipeline::ContentSource;
use crate::render::DocumentRenderer;
use crate::types::{OutputMode, PageReference, RequestId, ValidationError};
use serde::Serialize;
use std::sync::Arc;

/// What the export endpoint returns.
///
/// `message` is empty on success. Exactly one of `markdown` / `pdfPath`
/// is present, depending on the requested mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportResult {
    pub message: String,
    #[serde(flatten)]
    pub payload: ExportPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExportPayload {
    Markdown {
        markdown: Option<String>,
    },
    Pdf {
        #[serde(rename = "pdfPath")]
        pdf_path: Option<String>,
    },
}

impl ExportResult {
    fn success(payload: ExportPayload) -> Self {
        Self {
            message: String::new(),
            payload,
        }
    }

    /// A failure with no payload for `mode`.
    pub fn failure(mode: OutputMode, message: impl Into<String>) -> Self {
        let payload = match mode {
            OutputMode::Markdown => ExportPayload::Markdown { markdown: None },
            OutputMode::Pdf => ExportPayload::Pdf { pdf_path: None },
        };
        Self {
            message: message.into(),
            payload,
        }
    }

    pub fn is_success(&self) -> bool {
        self.message.is_empty()
    }
}

/// A completed export before it is reduced to an [`ExportResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exported {
    Markdown(String),
    Pdf(ExportArtifacts),
}

/// Runs exports against an injected content source and renderer.
#[derive(Clone)]
pub struct ExportAction {
    source: Arc<dyn ContentSource>,
    renderer: Arc<dyn DocumentRenderer>,
    workspace: ExportWorkspace,
}

impl ExportAction {
    pub fn new(
        source: Arc<dyn ContentSource>,
        renderer: Arc<dyn DocumentRenderer>,
        workspace: ExportWorkspace,
    ) -> Self {
        Self {
            source,
            renderer,
            workspace,
        }
    }

    pub fn workspace(&self) -> &ExportWorkspace {
        &self.workspace
    }

    /// Handles one form submission. Never fails: every error becomes a
    /// fixed message and the cause is logged.
    pub async fn export(&self, notion_url: Option<&str>, mode: OutputMode) -> ExportResult {
        let Some(notion_url) = notion_url.filter(|url| !url.trim().is_empty()) else {
            log::warn!("Export requested without a Notion URL");
            return ExportResult::failure(mode, MESSAGE_URL_REQUIRED);
        };

        match self.run(notion_url, mode).await {
            Ok(Exported::Markdown(markdown)) => ExportResult::success(ExportPayload::Markdown {
                markdown: Some(markdown),
            }),
            Ok(Exported::Pdf(artifacts)) => ExportResult::success(ExportPayload::Pdf {
                pdf_path: Some(artifacts.pdf_public_path),
            }),
            Err(err) => {
                log_failure(notion_url, &err);
                let message = match mode {
                    OutputMode::Markdown => MESSAGE_MARKDOWN_FAILED,
                    OutputMode::Pdf => MESSAGE_PDF_FAILED,
                };
                ExportResult::failure(mode, message)
            }
        }
    }

    /// Parses, fetches and, for PDF mode, renders. Errors propagate.
    pub async fn run(&self, notion_url: &str, mode: OutputMode) -> Result<Exported, AppError> {
        let notion_url = notion_url.trim();
        if notion_url.is_empty() {
            return Err(ValidationError::EmptyField("notionUrl").into());
        }

        let page = PageReference::from_url(notion_url)?;
        log::info!("Exporting page {} as {}", page, mode);

        let markdown = self.source.fetch_markdown(&page).await?;

        match mode {
            OutputMode::Markdown => Ok(Exported::Markdown(markdown)),
            OutputMode::Pdf => self.render_pdf(&page, &markdown).await.map(Exported::Pdf),
        }
    }

    async fn render_pdf(
        &self,
        page: &PageReference,
        markdown: &str,
    ) -> Result<ExportArtifacts, AppError> {
        let artifacts = self.workspace.prepare(RequestId::new_v4(), page).await?;

        let rendered = async {
            self.workspace.write_markdown(&artifacts, markdown).await?;
            self.renderer
                .render(markdown, &artifacts.pdf_path)
                .await
                .map_err(AppError::from)
        }
        .await;

        match rendered {
            Ok(()) => {
                log::info!("PDF ready at {}", artifacts.pdf_public_path);
                Ok(artifacts)
            }
            Err(err) => {
                self.workspace.discard(&artifacts).await;
                Err(err)
            }
        }
    }
}

fn log_failure(notion_url: &str, err: &AppError) {
    log::error!("Export of '{}' failed: {}", notion_url, err);
    for hint in troubleshooting_hints(err) {
        log::info!("  hint: {}", hint);
    }
}
