// src/output/paths.rs
//! Pure path and URL calculations for export artifacts.

use crate::constants::PUBLIC_TMP_PREFIX;
use crate::types::{PageReference, RequestId};
use std::path::{Path, PathBuf};

const MAX_FILENAME_CHARS: usize = 100;

/// Sanitizes a string to be safe for use as a filename.
pub fn sanitize_filename(name: &str) -> String {
    let safe_name: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let trimmed: String = safe_name
        .trim()
        .trim_matches('.')
        .chars()
        .take(MAX_FILENAME_CHARS)
        .collect();

    if trimmed.is_empty() {
        "unnamed".to_string()
    } else {
        trimmed
    }
}

/// File stem used for a page's artifacts, `<pageId>` made filesystem safe.
pub fn artifact_stem(page: &PageReference) -> String {
    sanitize_filename(page.as_str())
}

/// Directory holding the artifacts of one request.
pub fn request_dir(root: &Path, request_id: &RequestId) -> PathBuf {
    root.join(request_id.as_str())
}

/// URL path under which a request artifact is served,
/// `/tmp/<requestId>/<fileName>`.
pub fn public_path(request_id: &RequestId, file_name: &str) -> String {
    format!("{}/{}/{}", PUBLIC_TMP_PREFIX, request_id, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Hello/World"), "Hello_World");
        assert_eq!(sanitize_filename("Test:File*Name"), "Test_File_Name");
        assert_eq!(sanitize_filename("   spaces   "), "spaces");
        assert_eq!(sanitize_filename("...dots..."), "dots");
        assert_eq!(sanitize_filename(".."), "unnamed");
        assert_eq!(sanitize_filename(""), "unnamed");
    }

    #[test]
    fn test_long_names_are_cut_on_char_boundaries() {
        let name = "é".repeat(150);
        assert_eq!(sanitize_filename(&name).chars().count(), MAX_FILENAME_CHARS);
    }

    #[test]
    fn test_public_path_layout() {
        let request_id = RequestId::new_v4();
        let page = PageReference::from_url("https://www.notion.so/Doc-abc123").unwrap();
        let file_name = format!("{}.pdf", artifact_stem(&page));

        assert_eq!(
            public_path(&request_id, &file_name),
            format!("/tmp/{}/abc123.pdf", request_id)
        );
        assert_eq!(
            request_dir(Path::new("/srv/public/tmp"), &request_id),
            PathBuf::from(format!("/srv/public/tmp/{}", request_id))
        );
    }
}
