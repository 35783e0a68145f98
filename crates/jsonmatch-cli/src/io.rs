//! Document discovery and loading.
//!
//! Scans a directory (non-recursively) for `.json` / `.JSON` files and
//! parses each into a [`Document`]. Files that cannot be read or do not
//! satisfy the input contract are skipped with a logged diagnostic; only a
//! failure to enumerate the directory itself is an error.

use std::path::Path;

use jsonmatch_core::Document;

use crate::error::CliError;

/// Loads every matching document from `dir`, sorted by file name so the
/// assigned document ids are stable across runs.
///
/// # Errors
///
/// [`CliError::NotADirectory`] or [`CliError::DirectoryRead`] when the
/// directory itself is inaccessible.
pub fn load_documents(dir: &Path) -> Result<Vec<Document>, CliError> {
    if !dir.is_dir() {
        return Err(CliError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| CliError::DirectoryRead {
        path: dir.to_path_buf(),
        detail: e.to_string(),
    })?;

    let mut paths: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && matches!(
                    path.extension().and_then(|e| e.to_str()),
                    Some("json" | "JSON")
                )
        })
        .collect();
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<non-utf8>")
            .to_owned();

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(file = %path.display(), %err, "skipping unreadable file");
                continue;
            }
        };

        match Document::from_json_str(&text) {
            Ok(doc) => documents.push(doc.with_name(name)),
            Err(err) => {
                tracing::warn!(file = %path.display(), %err, "skipping document");
            }
        }
    }

    Ok(documents)
}
