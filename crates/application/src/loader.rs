use labelset_domain::{BlobHandle, PhotoId, PhotoRecord};
use tracing::{debug, warn};

use crate::document::PhotoDocument;
use crate::{ApplicationError, MetadataStore, SourceCategory};

/// Which documents survive loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFilter {
    pub collection: String,
    pub min_annotations: usize,
    pub require_reviewed: bool,
}

impl LoadFilter {
    pub fn for_category(category: &SourceCategory, min_annotations: usize) -> Self {
        Self {
            collection: category.collection.clone(),
            min_annotations,
            require_reviewed: category.require_reviewed,
        }
    }
}

pub struct RecordLoader<'a> {
    store: &'a dyn MetadataStore,
}

impl<'a> RecordLoader<'a> {
    pub fn new(store: &'a dyn MetadataStore) -> Self {
        Self { store }
    }

    /// Turns blobs into typed records, keeping input order.
    ///
    /// A blob is dropped when its name has no file part, its document is
    /// missing or malformed, it is not processed, it has fewer than
    /// `min_annotations` annotations, or (with `require_reviewed`) none of
    /// its annotations was reviewed. Store failures are propagated.
    pub fn load(
        &self,
        blobs: Vec<BlobHandle>,
        filter: &LoadFilter,
    ) -> Result<Vec<PhotoRecord>, ApplicationError> {
        let mut records = Vec::new();

        for blob in blobs {
            if blob.file_name().is_empty() {
                continue;
            }
            let photo_id = match PhotoId::new(blob.stem()) {
                Ok(photo_id) => photo_id,
                Err(error) => {
                    warn!(blob = blob.name(), %error, "unusable blob name, skipping");
                    continue;
                }
            };

            let Some(raw) = self.store.get_document(&filter.collection, photo_id.as_str())? else {
                debug!(%photo_id, "no metadata document, skipping");
                continue;
            };
            let document: PhotoDocument = match serde_json::from_value(raw) {
                Ok(document) => document,
                Err(error) => {
                    warn!(%photo_id, %error, "malformed metadata document, skipping");
                    continue;
                }
            };

            if !document.is_processed() {
                debug!(%photo_id, "not processed, skipping");
                continue;
            }
            if document.annotation_count() < filter.min_annotations {
                debug!(
                    %photo_id,
                    annotations = document.annotation_count(),
                    "too few annotations, skipping"
                );
                continue;
            }
            if filter.require_reviewed && !document.has_reviewed_annotation() {
                debug!(%photo_id, "no reviewed annotation, skipping");
                continue;
            }

            let record = PhotoRecord::from_blob(blob, document.into_annotations())?;
            if record.timestamp.is_none() {
                debug!(%photo_id, "could not parse capture time from identifier");
            }
            records.push(record);
        }

        Ok(records)
    }
}
