use std::fs;
use std::path::Path;

use labelset_application::{
    ApplicationError, DocumentScanSummary, DocumentScanner, ScannedDocument,
};
use serde_json::Value;
use walkdir::WalkDir;

const DOCUMENT_EXTENSION: &str = "json";

/// Finds `<id>.json` metadata exports in a folder tree.
#[derive(Debug, Default)]
pub struct WalkdirDocumentScanner;

impl DocumentScanner for WalkdirDocumentScanner {
    fn scan_documents(&self, folder: &Path) -> Result<DocumentScanSummary, ApplicationError> {
        if !folder.is_dir() {
            return Err(ApplicationError::InvalidInput(format!(
                "folder does not exist or is not a directory: {}",
                folder.display()
            )));
        }

        let mut summary = DocumentScanSummary::default();

        for entry in WalkDir::new(folder)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
        {
            if !entry.file_type().is_file() {
                continue;
            }

            summary.scanned_files += 1;
            let path = entry.path();
            let is_json = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION));
            let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if !is_json || id.is_empty() {
                continue;
            }

            summary.documents.push(ScannedDocument {
                id: id.to_string(),
                path: path.to_path_buf(),
            });
        }

        Ok(summary)
    }

    fn read_document(&self, path: &Path) -> Result<Value, ApplicationError> {
        let contents =
            fs::read_to_string(path).map_err(|error| ApplicationError::Io(error.to_string()))?;
        serde_json::from_str(&contents).map_err(|error| {
            ApplicationError::Decode(format!("{}: {error}", path.display()))
        })
    }
}
