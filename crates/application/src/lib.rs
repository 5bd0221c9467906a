mod config;
mod document;
mod error;
mod loader;
mod ports;
mod service;
mod use_cases;

pub use config::{
    ExportConfig, RecordFailurePolicy, SourceCategory, DEFAULT_DUPLICATE_WINDOW_SECS,
    DEFAULT_MIN_ANNOTATIONS, DEFAULT_SEED,
};
pub use error::ApplicationError;
pub use loader::{LoadFilter, RecordLoader};
pub use ports::{
    AnnotationWriter, BlobStore, DocumentScanSummary, DocumentScanner, ImageInspector,
    MetadataStore, OutputFolders, ScannedDocument,
};
pub use service::{ExportService, TRAIN_SPLIT, VAL_SPLIT};
pub use use_cases::{
    CategoryReport, ExportCommand, ExportReport, IngestDocumentsCommand, IngestReport,
};
