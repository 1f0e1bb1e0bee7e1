// src/output/writer.rs
//! Performs the filesystem side of exports.
//!
//! This module is the only place where export artifacts are written or
//! removed.

use super::paths::{artifact_stem, public_path, request_dir};
use super::types::*;
use crate::error::AppError;
use crate::types::{PageReference, RequestId};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// The public temp directory that holds per-request artifact folders.
#[derive(Debug, Clone)]
pub struct ExportWorkspace {
    root: PathBuf,
}

impl ExportWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the root directory if it is missing. Idempotent.
    pub async fn ensure_root(&self) -> Result<(), AppError> {
        create_directory(&self.root).await
    }

    /// Creates the request directory and computes the artifact paths of
    /// `page` inside it.
    pub async fn prepare(
        &self,
        request_id: RequestId,
        page: &PageReference,
    ) -> Result<ExportArtifacts, AppError> {
        self.ensure_root().await?;

        let dir = request_dir(&self.root, &request_id);
        tokio::fs::create_dir(&dir).await?;
        log::debug!("Created request directory {}", dir.display());

        let stem = artifact_stem(page);
        let pdf_name = format!("{}.pdf", stem);
        Ok(ExportArtifacts {
            markdown_path: dir.join(format!("{}.md", stem)),
            pdf_path: dir.join(&pdf_name),
            pdf_public_path: public_path(&request_id, &pdf_name),
            dir,
            request_id,
        })
    }

    /// Writes the intermediate Markdown file.
    pub async fn write_markdown(
        &self,
        artifacts: &ExportArtifacts,
        markdown: &str,
    ) -> Result<(), AppError> {
        log::debug!(
            "Writing {} bytes to {}",
            markdown.len(),
            artifacts.markdown_path.display()
        );
        tokio::fs::write(&artifacts.markdown_path, markdown).await?;
        Ok(())
    }

    /// Removes the request directory and anything rendered into it.
    ///
    /// Failures are logged; a failed export should not fail twice.
    pub async fn discard(&self, artifacts: &ExportArtifacts) {
        match tokio::fs::remove_dir_all(&artifacts.dir).await {
            Ok(()) => log::debug!("Removed {}", artifacts.dir.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Could not remove {}: {}", artifacts.dir.display(), e),
        }
    }

    /// Removes request directories last modified more than `max_age` ago
    /// and returns how many were removed.
    ///
    /// Only directories named like request ids are touched.
    pub async fn remove_stale(&self, max_age: Duration) -> Result<usize, AppError> {
        let Some(cutoff) = SystemTime::now().checked_sub(max_age) else {
            return Ok(0);
        };
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_name().to_str().and_then(RequestId::parse).is_none() {
                continue;
            }
            let Ok(meta) = entry.metadata().await else {
                continue;
            };
            let expired = meta.modified().map(|t| t < cutoff).unwrap_or(false);
            if !meta.is_dir() || !expired {
                continue;
            }

            let path = entry.path();
            match tokio::fs::remove_dir_all(&path).await {
                Ok(()) => {
                    log::debug!("Removed expired {}", path.display());
                    removed += 1;
                }
                Err(e) => log::warn!("Could not remove {}: {}", path.display(), e),
            }
        }

        if removed > 0 {
            log::info!("Removed {} expired request directories", removed);
        }
        Ok(removed)
    }
}

async fn create_directory(path: &Path) -> Result<(), AppError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", path.display()),
        ))),
        Err(_) => {
            tokio::fs::create_dir_all(path).await?;
            log::info!("Created directory: {}", path.display());
            Ok(())
        }
    }
}

/// Delivers a command line export result.
pub fn deliver(target: DeliveryTarget) -> Result<DeliveryReport, AppError> {
    match target {
        DeliveryTarget::WriteFile { path, content } => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, &content)?;
            log::info!("Wrote file: {}", path.display());
            Ok(DeliveryReport {
                bytes_written: content.len() as u64,
                destination: Some(path),
            })
        }
        DeliveryTarget::CopyFile { from, to } => {
            if let Some(parent) = to.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let bytes_written = std::fs::copy(&from, &to)?;
            log::info!("Copied {} to {}", from.display(), to.display());
            Ok(DeliveryReport {
                bytes_written,
                destination: Some(to),
            })
        }
        DeliveryTarget::PrintToStdout { content } => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
            Ok(DeliveryReport {
                bytes_written: content.len() as u64,
                destination: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page() -> PageReference {
        PageReference::from_url("https://www.notion.so/Doc-0123456789abcdef0123456789abcdef")
            .unwrap()
    }

    #[tokio::test]
    async fn test_prepare_creates_request_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let workspace = ExportWorkspace::new(tmp.path().join("public").join("tmp"));
        let request_id = RequestId::new_v4();

        let artifacts = workspace.prepare(request_id.clone(), &page()).await.unwrap();

        assert!(artifacts.dir.is_dir());
        assert_eq!(
            artifacts.markdown_path,
            artifacts.dir.join("0123456789abcdef0123456789abcdef.md")
        );
        assert_eq!(
            artifacts.pdf_public_path,
            format!("/tmp/{}/0123456789abcdef0123456789abcdef.pdf", request_id)
        );
    }

    #[tokio::test]
    async fn test_ensure_root_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let workspace = ExportWorkspace::new(tmp.path().join("tmp"));

        workspace.ensure_root().await.unwrap();
        workspace.ensure_root().await.unwrap();

        assert!(workspace.root().is_dir());
    }

    #[tokio::test]
    async fn test_discard_removes_everything() {
        let tmp = tempfile::tempdir().unwrap();
        let workspace = ExportWorkspace::new(tmp.path());
        let artifacts = workspace.prepare(RequestId::new_v4(), &page()).await.unwrap();
        workspace.write_markdown(&artifacts, "# Title").await.unwrap();
        std::fs::write(&artifacts.pdf_path, b"partial").unwrap();

        workspace.discard(&artifacts).await;
        workspace.discard(&artifacts).await;

        assert!(!artifacts.dir.exists());
    }

    fn age(path: &Path, seconds: u64) {
        let modified = SystemTime::now() - Duration::from_secs(seconds);
        std::fs::File::open(path)
            .unwrap()
            .set_modified(modified)
            .unwrap();
    }

    #[tokio::test]
    async fn test_remove_stale_keeps_fresh_requests() {
        let tmp = tempfile::tempdir().unwrap();
        let workspace = ExportWorkspace::new(tmp.path());
        let old = workspace.prepare(RequestId::new_v4(), &page()).await.unwrap();
        workspace.write_markdown(&old, "# Old").await.unwrap();
        let fresh = workspace.prepare(RequestId::new_v4(), &page()).await.unwrap();
        let unrelated = tmp.path().join("assets");
        std::fs::create_dir(&unrelated).unwrap();
        age(&old.dir, 7_200);
        age(&unrelated, 7_200);

        let removed = workspace
            .remove_stale(Duration::from_secs(3_600))
            .await
            .unwrap();

        assert_eq!(removed, 1);
        assert!(!old.dir.exists());
        assert!(fresh.dir.is_dir());
        assert!(unrelated.is_dir());
    }

    #[tokio::test]
    async fn test_remove_stale_without_root_is_a_no_op() {
        let tmp = tempfile::tempdir().unwrap();
        let workspace = ExportWorkspace::new(tmp.path().join("missing"));

        let removed = workspace.remove_stale(Duration::ZERO).await.unwrap();

        assert_eq!(removed, 0);
    }

    #[test]
    fn test_deliver_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out").join("page.md");

        let report = deliver(DeliveryTarget::WriteFile {
            path: path.clone(),
            content: "hello".to_string(),
        })
        .unwrap();

        assert_eq!(report.bytes_written, 5);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_root_that_is_a_file_is_rejected() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let workspace = ExportWorkspace::new(tmp.path());
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        assert!(runtime.block_on(workspace.ensure_root()).is_err());
    }
}
