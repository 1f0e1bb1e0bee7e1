// src/render/pdf.rs
//! PDF rendering through an external HTML-to-PDF engine.

use super::highlight::RegexHighlighter;
use super::html::HtmlDocumentBuilder;
use super::theme::Theme;
use crate::constants::*;
use crate::error::RenderError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Turns a Markdown document into a PDF file.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    async fn render(&self, markdown: &str, output_path: &Path) -> Result<(), RenderError>;
}

/// Options handed to the external renderer.
#[derive(Debug, Clone)]
pub struct PdfOptions {
    pub program: String,
    pub theme: Theme,
    pub title: String,
    pub paper_format: String,
    pub orientation: String,
    pub border: String,
    pub render_delay: Duration,
    pub timeout: Duration,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            program: DEFAULT_PDF_RENDERER.to_string(),
            theme: Theme::default(),
            title: DEFAULT_DOCUMENT_TITLE.to_string(),
            paper_format: PDF_PAPER_FORMAT.to_string(),
            orientation: PDF_ORIENTATION.to_string(),
            border: PDF_PAGE_BORDER.to_string(),
            render_delay: Duration::from_millis(PDF_RENDER_DELAY_MS),
            timeout: Duration::from_millis(PDF_RENDER_TIMEOUT_MS),
        }
    }
}

impl PdfOptions {
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn arguments(&self, html_path: &Path, output_path: &Path) -> Vec<String> {
        vec![
            "--quiet".to_string(),
            "--encoding".to_string(),
            "utf-8".to_string(),
            "--page-size".to_string(),
            self.paper_format.clone(),
            "--orientation".to_string(),
            self.orientation.clone(),
            "--margin-top".to_string(),
            self.border.clone(),
            "--margin-bottom".to_string(),
            self.border.clone(),
            "--margin-left".to_string(),
            self.border.clone(),
            "--margin-right".to_string(),
            self.border.clone(),
            "--javascript-delay".to_string(),
            self.render_delay.as_millis().to_string(),
            "--enable-local-file-access".to_string(),
            "--title".to_string(),
            self.title.clone(),
            html_path.display().to_string(),
            output_path.display().to_string(),
        ]
    }
}

/// Renders Markdown to themed HTML, then prints it with `wkhtmltopdf`.
///
/// The intermediate HTML is written next to the PDF with an `.html`
/// extension and removed once the renderer exits.
#[derive(Debug, Clone, Default)]
pub struct WkhtmltopdfRenderer {
    options: PdfOptions,
}

impl WkhtmltopdfRenderer {
    pub fn new(options: PdfOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PdfOptions {
        &self.options
    }

    fn html_path(output_path: &Path) -> PathBuf {
        output_path.with_extension("html")
    }

    async fn run(&self, html_path: &Path, output_path: &Path) -> Result<(), RenderError> {
        let args = self.options.arguments(html_path, output_path);
        log::debug!("Running {} {}", self.options.program, args.join(" "));

        let child = Command::new(&self.options.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RenderError::Spawn {
                program: self.options.program.clone(),
                source,
            })?;

        let output = tokio::time::timeout(self.options.timeout, child.wait_with_output())
            .await
            .map_err(|_| RenderError::TimedOut(self.options.timeout))??;

        if !output.status.success() {
            return Err(RenderError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if !tokio::fs::try_exists(output_path).await? {
            return Err(RenderError::MissingOutput(output_path.to_path_buf()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentRenderer for WkhtmltopdfRenderer {
    async fn render(&self, markdown: &str, output_path: &Path) -> Result<(), RenderError> {
        let html = HtmlDocumentBuilder::new(&RegexHighlighter, self.options.theme)
            .render_document(markdown, &self.options.title);

        let html_path = Self::html_path(output_path);
        tokio::fs::write(&html_path, html).await?;

        let result = self.run(&html_path, output_path).await;

        if let Err(e) = tokio::fs::remove_file(&html_path).await {
            log::warn!("Could not remove {}: {}", html_path.display(), e);
        }

        match &result {
            Ok(()) => log::info!("Rendered PDF to {}", output_path.display()),
            Err(e) => log::error!("PDF rendering failed: {}", e),
        }
        result
    }
}
