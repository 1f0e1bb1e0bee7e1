// src/output/mod.rs
//! Export artifacts on disk.
//!
//! Path calculations are pure functions; all I/O happens in `writer`.

mod paths;
mod types;
mod writer;

pub use paths::{artifact_stem, public_path, sanitize_filename};
pub use types::{DeliveryReport, DeliveryTarget, ExportArtifacts};
pub use writer::{deliver, ExportWorkspace};
