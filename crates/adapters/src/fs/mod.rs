mod blobs;
mod folders;
mod scanner;

pub use blobs::LocalBlobStore;
pub use folders::{ensure_unique_name, FsOutputFolders};
pub use scanner::WalkdirDocumentScanner;
