// src/render/mod.rs
//! Markdown to PDF rendering: HTML generation, code highlighting, themes
//! and the external PDF engine.

pub mod highlight;
pub mod html;
pub mod pdf;
pub mod theme;

pub use highlight::{CodeHighlighter, RegexHighlighter};
pub use html::{escape_html, HtmlDocumentBuilder};
pub use pdf::{DocumentRenderer, PdfOptions, WkhtmltopdfRenderer};
pub use theme::Theme;
