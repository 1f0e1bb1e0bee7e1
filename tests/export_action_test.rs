mod common;

use common::*;
use notion2pdf::constants::{MESSAGE_MARKDOWN_FAILED, MESSAGE_PDF_FAILED, MESSAGE_URL_REQUIRED};
use notion2pdf::{ExportPayload, OutputMode};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::{Path, PathBuf};

fn local_path(root: &Path, public_path: &str) -> PathBuf {
    root.join(public_path.trim_start_matches("/tmp/"))
}

fn pdf_path(payload: &ExportPayload) -> Option<&str> {
    match payload {
        ExportPayload::Pdf { pdf_path } => pdf_path.as_deref(),
        other => panic!("expected a PDF payload, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_url_skips_fetch() {
    let tmp = tempfile::tempdir().unwrap();
    let source = StubSource::returning("Hello");
    let action = action(source.clone(), StubRenderer::succeeding(), tmp.path());

    let result = action.export(None, OutputMode::Markdown).await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({ "message": MESSAGE_URL_REQUIRED, "markdown": null })
    );
    assert_eq!(source.call_count(), 0);
}

#[tokio::test]
async fn test_blank_url_in_pdf_mode() {
    let tmp = tempfile::tempdir().unwrap();
    let source = StubSource::returning("Hello");
    let action = action(source.clone(), StubRenderer::succeeding(), tmp.path());

    let result = action.export(Some("   "), OutputMode::Pdf).await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({ "message": MESSAGE_URL_REQUIRED, "pdfPath": null })
    );
    assert_eq!(source.call_count(), 0);
}

#[tokio::test]
async fn test_markdown_export_returns_text() {
    let tmp = tempfile::tempdir().unwrap();
    let source = StubSource::returning("# Notion Export\n\nHello");
    let action = action(source.clone(), StubRenderer::succeeding(), tmp.path());

    let result = action.export(Some(PAGE_URL), OutputMode::Markdown).await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({ "message": "", "markdown": "# Notion Export\n\nHello" })
    );
    assert_eq!(*source.pages.lock().unwrap(), vec![PAGE_ID.to_string()]);
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_fetch_failure_becomes_fixed_message() {
    let tmp = tempfile::tempdir().unwrap();
    let action = action(StubSource::failing(), StubRenderer::succeeding(), tmp.path());

    let markdown = action.export(Some(PAGE_URL), OutputMode::Markdown).await;
    let pdf = action.export(Some(PAGE_URL), OutputMode::Pdf).await;

    assert_eq!(
        serde_json::to_value(&markdown).unwrap(),
        json!({ "message": MESSAGE_MARKDOWN_FAILED, "markdown": null })
    );
    assert_eq!(
        serde_json::to_value(&pdf).unwrap(),
        json!({ "message": MESSAGE_PDF_FAILED, "pdfPath": null })
    );
}

#[tokio::test]
async fn test_pdf_export_writes_request_scoped_files() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("public").join("tmp");
    let action = action(
        StubSource::returning("# Notion Export\n\nHello"),
        StubRenderer::succeeding(),
        &root,
    );

    let result = action.export(Some(PAGE_URL), OutputMode::Pdf).await;

    assert!(result.is_success());
    let public = pdf_path(&result.payload).unwrap().to_string();
    assert!(public.starts_with("/tmp/"));
    assert!(public.ends_with(&format!("/{}.pdf", PAGE_ID)));

    let pdf = local_path(&root, &public);
    assert!(pdf.is_file());
    let markdown = pdf.with_extension("md");
    assert_eq!(
        std::fs::read_to_string(markdown).unwrap(),
        "# Notion Export\n\nHello"
    );
}

#[tokio::test]
async fn test_pdf_failure_leaves_nothing_behind() {
    let tmp = tempfile::tempdir().unwrap();
    let action = action(
        StubSource::returning("Hello"),
        StubRenderer::failing(),
        tmp.path(),
    );

    let result = action.export(Some(PAGE_URL), OutputMode::Pdf).await;

    assert_eq!(result.message, MESSAGE_PDF_FAILED);
    assert_eq!(pdf_path(&result.payload), None);
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_concurrent_exports_of_one_page_do_not_collide() {
    let tmp = tempfile::tempdir().unwrap();
    let action = action(
        StubSource::returning("Hello"),
        StubRenderer::succeeding(),
        tmp.path(),
    );

    let (first, second) = tokio::join!(
        action.export(Some(PAGE_URL), OutputMode::Pdf),
        action.export(Some(PAGE_URL), OutputMode::Pdf)
    );

    let first = pdf_path(&first.payload).unwrap().to_string();
    let second = pdf_path(&second.payload).unwrap().to_string();
    assert_ne!(first, second);
    assert!(local_path(tmp.path(), &first).is_file());
    assert!(local_path(tmp.path(), &second).is_file());
}
