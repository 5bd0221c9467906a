use std::fs;
use std::path::{Path, PathBuf};

use labelset_application::ExportConfig;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalog_path: PathBuf,
    pub blob_root: PathBuf,
    pub export: ExportConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("catalog.sqlite3"),
            blob_root: PathBuf::from("blobs"),
            export: ExportConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reads a TOML file, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path)
            .map_err(|error| format!("failed to read config {}: {error}", path.display()))?;
        toml::from_str(&raw)
            .map_err(|error| format!("invalid config {}: {error}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelset_application::RecordFailurePolicy;
    use tempfile::TempDir;

    #[test]
    fn missing_path_uses_defaults() {
        let config = AppConfig::load(None).expect("defaults");
        assert_eq!(config.catalog_path, PathBuf::from("catalog.sqlite3"));
        assert_eq!(config.blob_root, PathBuf::from("blobs"));
        assert_eq!(config.export, ExportConfig::default());
    }

    #[test]
    fn file_overrides_selected_fields() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("labelset.toml");
        fs::write(
            &path,
            r#"
blob_root = "/data/blobs"

[export]
seed = 7
on_record_error = "skip"

[[export.categories]]
name = "processed"
blob_prefix = "processed_photos_4/"
collection = "photos_4"
val_ratio = 0.25
deduplicate = true
"#,
        )
        .expect("write");

        let config = AppConfig::load(Some(&path)).expect("load");
        assert_eq!(config.blob_root, PathBuf::from("/data/blobs"));
        assert_eq!(config.catalog_path, PathBuf::from("catalog.sqlite3"));
        assert_eq!(config.export.seed, 7);
        assert_eq!(config.export.duplicate_window_secs, 300);
        assert_eq!(config.export.on_record_error, RecordFailurePolicy::Skip);
        assert_eq!(config.export.categories.len(), 1);
        assert_eq!(config.export.categories[0].val_ratio.get(), 0.25);
        assert!(!config.export.categories[0].require_reviewed);
    }

    #[test]
    fn out_of_range_ratio_is_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("labelset.toml");
        fs::write(
            &path,
            r#"
[[export.categories]]
name = "errors"
blob_prefix = "errors/"
collection = "errors"
val_ratio = 3.0
"#,
        )
        .expect("write");

        assert!(AppConfig::load(Some(&path)).is_err());
    }
}
