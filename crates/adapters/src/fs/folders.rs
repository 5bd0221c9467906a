use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use labelset_application::{ApplicationError, OutputFolders};
use labelset_domain::unique_photo_name;

#[derive(Debug, Default)]
pub struct FsOutputFolders;

impl OutputFolders for FsOutputFolders {
    fn prepare(&self, root: &Path, split: &str) -> Result<PathBuf, ApplicationError> {
        let folder = root.join(split);
        fs::create_dir_all(&folder).map_err(|error| {
            ApplicationError::Io(format!("failed to create {}: {error}", folder.display()))
        })?;
        Ok(folder)
    }

    fn ensure_unique_name(&self, folder: &Path, file_name: &str) -> String {
        ensure_unique_name(folder, file_name)
    }

    fn discard(&self, path: &Path) -> Result<(), ApplicationError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(ApplicationError::Io(format!(
                "failed to remove {}: {error}",
                path.display()
            ))),
        }
    }
}

/// First name derived from `file_name` that, together with its annotation
/// name, does not exist in `folder`.
pub fn ensure_unique_name(folder: &Path, file_name: &str) -> String {
    unique_photo_name(file_name, |candidate| folder.join(candidate).exists())
}
