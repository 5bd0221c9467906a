use std::path::{Path, PathBuf};

use labelset_domain::{BlobHandle, ImageSize, VocAnnotation};
use serde_json::Value;

use crate::ApplicationError;

/// Document database holding one metadata document per photo.
pub trait MetadataStore {
    fn get_document(&self, collection: &str, id: &str) -> Result<Option<Value>, ApplicationError>;

    fn put_document(
        &self,
        collection: &str,
        id: &str,
        document: &Value,
    ) -> Result<(), ApplicationError>;

    fn count_documents(&self, collection: &str) -> Result<usize, ApplicationError>;
}

/// Object storage holding the raw image bytes.
pub trait BlobStore {
    fn list_blobs(&self, prefix: &str) -> Result<Vec<BlobHandle>, ApplicationError>;

    fn download_to(&self, blob: &BlobHandle, destination: &Path) -> Result<(), ApplicationError>;
}

pub trait ImageInspector {
    fn inspect(&self, path: &Path) -> Result<ImageSize, ApplicationError>;
}

pub trait AnnotationWriter {
    fn write(&self, annotation: &VocAnnotation, path: &Path) -> Result<(), ApplicationError>;
}

pub trait OutputFolders {
    /// Creates `root/split` if needed and returns its path.
    fn prepare(&self, root: &Path, split: &str) -> Result<PathBuf, ApplicationError>;

    /// Returns a name in `folder` such that neither the image nor its
    /// annotation file exists yet.
    fn ensure_unique_name(&self, folder: &Path, file_name: &str) -> String;

    /// Removes a partially written output file; a missing file is not an error.
    fn discard(&self, path: &Path) -> Result<(), ApplicationError>;
}

#[derive(Debug, Clone)]
pub struct ScannedDocument {
    pub id: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentScanSummary {
    pub scanned_files: usize,
    pub documents: Vec<ScannedDocument>,
}

pub trait DocumentScanner {
    fn scan_documents(&self, folder: &Path) -> Result<DocumentScanSummary, ApplicationError>;

    /// Reads one scanned file. Unparseable content is reported as
    /// [`ApplicationError::Decode`].
    fn read_document(&self, path: &Path) -> Result<Value, ApplicationError>;
}
