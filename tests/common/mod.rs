#![allow(dead_code)]

use async_trait::async_trait;
use notion2pdf::{
    AppError, ContentSource, DocumentRenderer, ExportAction, ExportWorkspace, PageReference,
    RenderError,
};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Content source returning canned Markdown, or failing when it has none.
pub struct StubSource {
    markdown: Option<String>,
    pub calls: AtomicUsize,
    pub pages: Mutex<Vec<String>>,
}

impl StubSource {
    pub fn returning(markdown: &str) -> Arc<Self> {
        Arc::new(Self {
            markdown: Some(markdown.to_string()),
            calls: AtomicUsize::new(0),
            pages: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            markdown: None,
            calls: AtomicUsize::new(0),
            pages: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentSource for StubSource {
    async fn fetch_markdown(&self, page: &PageReference) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages.lock().unwrap().push(page.as_str().to_string());
        self.markdown
            .clone()
            .ok_or_else(|| AppError::MalformedResponse("upstream exploded".to_string()))
    }
}

/// Renderer that writes the Markdown it receives as the "PDF", or writes a
/// partial file and fails.
pub struct StubRenderer {
    succeed: bool,
}

impl StubRenderer {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self { succeed: true })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { succeed: false })
    }
}

#[async_trait]
impl DocumentRenderer for StubRenderer {
    async fn render(&self, markdown: &str, output_path: &Path) -> Result<(), RenderError> {
        if self.succeed {
            tokio::fs::write(output_path, format!("%PDF-stub\n{}", markdown)).await?;
            Ok(())
        } else {
            tokio::fs::write(output_path, b"%PDF-partial").await?;
            Err(RenderError::Failed {
                status: "exit status: 1".to_string(),
                stderr: "Exit with code 1 due to network error".to_string(),
            })
        }
    }
}

pub fn action(
    source: Arc<StubSource>,
    renderer: Arc<StubRenderer>,
    root: &Path,
) -> ExportAction {
    ExportAction::new(source, renderer, ExportWorkspace::new(root))
}

pub const PAGE_URL: &str =
    "https://www.notion.so/workspace/Project-Notes-0123456789abcdef0123456789abcdef?pvs=4";
pub const PAGE_ID: &str = "0123456789abcdef0123456789abcdef";
