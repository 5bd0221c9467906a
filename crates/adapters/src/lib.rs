pub mod fs;
pub mod inspector;
pub mod migrations;
pub mod presenters;
pub mod sqlite;
pub mod voc;

pub use fs::{ensure_unique_name, FsOutputFolders, LocalBlobStore, WalkdirDocumentScanner};
pub use inspector::ImageCrateInspector;
pub use presenters::{present_category_row, present_export_report, present_ingest_report};
pub use sqlite::SqliteMetadataStore;
pub use voc::{render_annotation, QuickXmlAnnotationWriter};
