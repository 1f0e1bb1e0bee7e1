// src/output/types.rs
//! Type definitions for export artifacts and local delivery.

use crate::types::RequestId;
use std::path::PathBuf;

/// The files one PDF export produces, and where they are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifacts {
    pub request_id: RequestId,
    /// `<root>/<requestId>`
    pub dir: PathBuf,
    pub markdown_path: PathBuf,
    pub pdf_path: PathBuf,
    /// Public URL path of the PDF.
    pub pdf_public_path: String,
}

/// Where the command line export puts its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryTarget {
    /// Write content to a file, creating parent directories.
    WriteFile { path: PathBuf, content: String },
    /// Copy an already rendered file to its destination.
    CopyFile { from: PathBuf, to: PathBuf },
    /// Print to stdout.
    PrintToStdout { content: String },
}

/// What a delivery did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub bytes_written: u64,
    pub destination: Option<PathBuf>,
}
