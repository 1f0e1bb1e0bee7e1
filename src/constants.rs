// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Reading these constants should tell you how an export behaves: how much
//! it fetches per request, how deep it recurses, how the PDF is laid out
//! and how long the renderer may take.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many blocks the Notion API returns per page of results.
///
/// The Notion API maximum is 100.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Notion API version sent with every request.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// Base URL of the Notion REST API.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// Maximum nesting depth when recursively fetching block children.
pub const NOTION_MAX_FETCH_DEPTH: u8 = 50;

/// Upper bound on children requests in flight during one tree fetch.
///
/// Notion answers bursts with `rate_limited`, so wide pages are fetched
/// at most this many blocks at a time.
pub const MAX_CONCURRENT_FETCHES: usize = 24;

// ---------------------------------------------------------------------------
// Markdown conversion
// ---------------------------------------------------------------------------

/// Title used for the `# ` heading prepended to converted pages.
pub const DEFAULT_DOCUMENT_TITLE: &str = "Notion Export";

/// Maximum nesting depth when rendering blocks to Markdown.
pub const BLOCK_MAX_RENDER_DEPTH: usize = 100;

/// Base URL for links to pages and databases that are not inlined.
pub const NOTION_PAGE_BASE_URL: &str = "https://www.notion.so";

/// Estimated characters per block, used to pre-allocate output strings.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 256;

// ---------------------------------------------------------------------------
// PDF rendering
// ---------------------------------------------------------------------------

/// Paper format handed to the renderer.
pub const PDF_PAPER_FORMAT: &str = "A4";

/// Page orientation handed to the renderer.
pub const PDF_ORIENTATION: &str = "Portrait";

/// Border on every side of the page.
pub const PDF_PAGE_BORDER: &str = "1.2cm";

/// Time the renderer waits for scripts before printing.
pub const PDF_RENDER_DELAY_MS: u64 = 2_000;

/// Upper bound on a single render.
pub const PDF_RENDER_TIMEOUT_MS: u64 = 100_000;

/// Renderer executable looked up on `PATH` unless configured.
pub const DEFAULT_PDF_RENDERER: &str = "wkhtmltopdf";

// ---------------------------------------------------------------------------
// Export surface
// ---------------------------------------------------------------------------

/// URL prefix under which generated files are served.
pub const PUBLIC_TMP_PREFIX: &str = "/tmp";

/// Age after which a request's generated files are removed.
pub const ARTIFACT_TTL_SECS: u64 = 3_600;

/// How often the server looks for expired request directories.
pub const ARTIFACT_SWEEP_INTERVAL_SECS: u64 = 600;

/// Default address for `notion2pdf serve`.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

pub const MESSAGE_URL_REQUIRED: &str = "Notion URL is required";

pub const MESSAGE_MARKDOWN_FAILED: &str =
    "Failed to convert Notion page. Please check the URL and try again.";

pub const MESSAGE_PDF_FAILED: &str =
    "Failed to convert Notion page to PDF. Please check the URL and try again.";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
