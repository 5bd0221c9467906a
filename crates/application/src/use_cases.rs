use std::path::PathBuf;

use labelset_domain::LabelTally;

use crate::ExportConfig;

#[derive(Debug, Clone, Default)]
pub struct ExportCommand {
    pub config: ExportConfig,
}

#[derive(Debug, Clone)]
pub struct IngestDocumentsCommand {
    pub collection: String,
    pub folder: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryReport {
    pub name: String,
    pub listed_blobs: usize,
    pub loaded: usize,
    pub after_dedup: usize,
    pub train: usize,
    pub val: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub categories: Vec<CategoryReport>,
    pub train_saved: usize,
    pub val_saved: usize,
    pub failed: usize,
    pub labels: LabelTally,
    pub output_root: PathBuf,
}

impl ExportReport {
    pub fn photos_saved(&self) -> usize {
        self.train_saved + self.val_saved
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub scanned_files: usize,
    pub ingested: usize,
    pub rejected: usize,
    /// Documents held by the collection once ingestion finished.
    pub collection_size: usize,
}
