use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use labelset_domain::{ValRatio, DEFAULT_SOURCE_DATABASE};
use serde::{Deserialize, Serialize};

use crate::ApplicationError;

pub const DEFAULT_SEED: u64 = 69;
pub const DEFAULT_MIN_ANNOTATIONS: usize = 1;
pub const DEFAULT_DUPLICATE_WINDOW_SECS: u64 = 300;

/// What to do when one photo cannot be downloaded, inspected or written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordFailurePolicy {
    /// Stop the whole export at the first failing photo.
    #[default]
    Abort,
    /// Log the failure, count it and move on.
    Skip,
}

/// One family of photos: a blob prefix paired with its metadata collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceCategory {
    pub name: String,
    pub blob_prefix: String,
    pub collection: String,
    pub val_ratio: ValRatio,
    #[serde(default)]
    pub deduplicate: bool,
    #[serde(default)]
    pub require_reviewed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub seed: u64,
    pub output_root: PathBuf,
    pub min_annotations: usize,
    pub duplicate_window_secs: u64,
    pub source_database: String,
    pub on_record_error: RecordFailurePolicy,
    pub categories: Vec<SourceCategory>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            output_root: PathBuf::from("downloaded_photos"),
            min_annotations: DEFAULT_MIN_ANNOTATIONS,
            duplicate_window_secs: DEFAULT_DUPLICATE_WINDOW_SECS,
            source_database: DEFAULT_SOURCE_DATABASE.to_string(),
            on_record_error: RecordFailurePolicy::Abort,
            categories: default_categories(),
        }
    }
}

fn default_categories() -> Vec<SourceCategory> {
    vec![
        SourceCategory {
            name: "processed".to_string(),
            blob_prefix: "processed_photos_3/".to_string(),
            collection: "photos_3".to_string(),
            val_ratio: ValRatio::from_percent(30),
            deduplicate: true,
            require_reviewed: false,
        },
        SourceCategory {
            name: "errors".to_string(),
            blob_prefix: "errors/".to_string(),
            collection: "errors".to_string(),
            val_ratio: ValRatio::from_percent(20),
            deduplicate: false,
            require_reviewed: true,
        },
    ]
}

impl ExportConfig {
    pub fn duplicate_window(&self) -> Duration {
        Duration::from_secs(self.duplicate_window_secs)
    }

    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.output_root.as_os_str().is_empty() {
            return Err(ApplicationError::Config(
                "output root must not be empty".to_string(),
            ));
        }
        if self.categories.is_empty() {
            return Err(ApplicationError::Config(
                "at least one source category is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(ApplicationError::Config(
                    "category name must not be empty".to_string(),
                ));
            }
            if category.collection.trim().is_empty() {
                return Err(ApplicationError::Config(format!(
                    "category {} has an empty collection",
                    category.name
                )));
            }
            if !seen.insert(category.name.as_str()) {
                return Err(ApplicationError::Config(format!(
                    "duplicate category name: {}",
                    category.name
                )));
            }
        }
        Ok(())
    }
}
