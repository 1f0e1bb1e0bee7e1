// src/lib.rs
//! notion2pdf library: exports Notion pages as Markdown or themed PDF.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`, `RenderError`
//! - **Configuration**: `AppConfig`, `CommandLineInput`
//! - **Domain model**: `Block` and its block types
//! - **API client**: `NotionHttpClient`, `NotionRepository`, `fetch_block_tree`
//! - **Formatting**: `convert_blocks`, `assemble_document`, `ConvertedMarkdown`
//! - **Rendering**: `DocumentRenderer`, `WkhtmltopdfRenderer`, `Theme`
//! - **Export**: `ExportAction`, `ExportResult`, the axum router

pub mod analytics;
pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod formatting;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod server;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionClientError, NotionErrorCode, RenderError};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{AppConfig, CommandLineInput, Task};

// --- Domain Model ---
pub use crate::model::{Block, BlockCommon};

// --- Domain Types ---
pub use crate::types::{ApiKey, BlockId, OutputMode, PageReference, RequestId, RichTextItem};

// --- API Client ---
pub use crate::api::{fetch_block_tree, FetchOptions, NotionHttpClient, NotionRepository};

// --- Formatting ---
pub use crate::formatting::{assemble_document, convert_blocks, ConversionSettings, ConvertedMarkdown};

// --- Rendering ---
pub use crate::render::{DocumentRenderer, PdfOptions, Theme, WkhtmltopdfRenderer};

// --- Export ---
pub use crate::export::{ExportAction, ExportPayload, ExportResult, Exported};
pub use crate::output::ExportWorkspace;
pub use crate::pipeline::{ContentSource, NotionContentSource};
pub use crate::server::{create_router, AppState};
