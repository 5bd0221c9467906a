use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;

use crate::{parse_timestamp, split_extension, Annotation, DomainError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhotoId(String);

impl PhotoId {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::EmptyPhotoId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PhotoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Path-like name of an object in the blob store, `/`-separated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobHandle {
    name: String,
}

impl BlobHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last path segment; empty for prefix placeholders like `errors/`.
    pub fn file_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    /// File name without its extension.
    pub fn stem(&self) -> &str {
        split_extension(self.file_name()).0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhotoRecord {
    pub id: PhotoId,
    pub file_name: String,
    pub timestamp: Option<NaiveDateTime>,
    pub annotations: Vec<Annotation>,
    pub source: BlobHandle,
}

impl PhotoRecord {
    /// Builds a record for `source`, deriving id and capture time from its name.
    pub fn from_blob(source: BlobHandle, annotations: Vec<Annotation>) -> Result<Self, DomainError> {
        let id = PhotoId::new(source.stem())?;
        let timestamp = parse_timestamp(id.as_str());
        Ok(Self {
            file_name: source.file_name().to_string(),
            id,
            timestamp,
            annotations,
            source,
        })
    }

    pub fn annotation_count(&self) -> usize {
        self.annotations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_id_must_not_be_empty() {
        assert!(PhotoId::new("1752776145").is_ok());
        assert_eq!(PhotoId::new("  "), Err(DomainError::EmptyPhotoId));
    }

    #[test]
    fn blob_handle_splits_name() {
        let handle = BlobHandle::new("processed_photos_3/20250717_181545_592272.jpg");
        assert_eq!(handle.file_name(), "20250717_181545_592272.jpg");
        assert_eq!(handle.stem(), "20250717_181545_592272");

        let placeholder = BlobHandle::new("errors/");
        assert_eq!(placeholder.file_name(), "");

        let dotfile = BlobHandle::new("errors/.keep");
        assert_eq!(dotfile.stem(), ".keep");
    }

    #[test]
    fn record_from_blob_parses_capture_time() {
        let record = PhotoRecord::from_blob(BlobHandle::new("errors/1752776145.jpg"), Vec::new())
            .expect("record");
        assert_eq!(record.id.as_str(), "1752776145");
        assert_eq!(record.file_name, "1752776145.jpg");
        assert!(record.timestamp.is_some());
    }
}
