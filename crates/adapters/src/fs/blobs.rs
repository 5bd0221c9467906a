use std::fs;
use std::path::{Path, PathBuf};

use labelset_application::{ApplicationError, BlobStore};
use labelset_domain::BlobHandle;
use walkdir::WalkDir;

/// Blob store backed by a local directory; blob names are paths relative to
/// `root` with `/` separators.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn blob_name(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|part| part.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

impl BlobStore for LocalBlobStore {
    fn list_blobs(&self, prefix: &str) -> Result<Vec<BlobHandle>, ApplicationError> {
        if !self.root.is_dir() {
            return Err(ApplicationError::InvalidInput(format!(
                "blob root does not exist or is not a directory: {}",
                self.root.display()
            )));
        }

        // Walk only the directory part of the prefix; the rest filters names.
        let directory = prefix.rfind('/').map_or("", |index| &prefix[..index]);
        let start = self.root.join(directory);
        if !start.is_dir() {
            return Ok(Vec::new());
        }

        let mut blobs = Vec::new();
        for entry in WalkDir::new(&start)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = self.blob_name(entry.path()) else {
                continue;
            };
            if name.starts_with(prefix) {
                blobs.push(BlobHandle::new(name));
            }
        }

        Ok(blobs)
    }

    fn download_to(&self, blob: &BlobHandle, destination: &Path) -> Result<(), ApplicationError> {
        let source = self.root.join(blob.name());
        if !source.is_file() {
            return Err(ApplicationError::NotFound(format!("blob {}", blob.name())));
        }
        fs::copy(&source, destination).map_err(|error| {
            ApplicationError::Io(format!(
                "failed to copy {} to {}: {error}",
                blob.name(),
                destination.display()
            ))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, name: &str, contents: &[u8]) {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(path, contents).expect("write");
    }

    #[test]
    fn lists_blobs_under_prefix_in_name_order() {
        let dir = TempDir::new().expect("tempdir");
        touch(dir.path(), "errors/b.jpg", b"b");
        touch(dir.path(), "errors/a.jpg", b"a");
        touch(dir.path(), "errors/nested/c.jpg", b"c");
        touch(dir.path(), "processed_photos_3/x.jpg", b"x");

        let store = LocalBlobStore::new(dir.path());
        let names: Vec<String> = store
            .list_blobs("errors/")
            .expect("list")
            .iter()
            .map(|blob| blob.name().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["errors/a.jpg", "errors/b.jpg", "errors/nested/c.jpg"]
        );
    }

    #[test]
    fn partial_file_prefix_filters_names() {
        let dir = TempDir::new().expect("tempdir");
        touch(dir.path(), "photos/2025_a.jpg", b"a");
        touch(dir.path(), "photos/2024_b.jpg", b"b");

        let store = LocalBlobStore::new(dir.path());
        let blobs = store.list_blobs("photos/2025").expect("list");
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].name(), "photos/2025_a.jpg");
    }

    #[test]
    fn missing_prefix_directory_lists_nothing() {
        let dir = TempDir::new().expect("tempdir");
        let store = LocalBlobStore::new(dir.path());
        assert!(store.list_blobs("nothing/").expect("list").is_empty());
    }

    #[test]
    fn download_copies_bytes() {
        let dir = TempDir::new().expect("tempdir");
        touch(dir.path(), "errors/a.jpg", b"payload");
        let store = LocalBlobStore::new(dir.path());
        let destination = dir.path().join("out.jpg");

        store
            .download_to(&BlobHandle::new("errors/a.jpg"), &destination)
            .expect("download");
        assert_eq!(fs::read(&destination).expect("read"), b"payload");

        let missing = store.download_to(&BlobHandle::new("errors/none.jpg"), &destination);
        assert!(matches!(missing, Err(ApplicationError::NotFound(_))));
    }
}
