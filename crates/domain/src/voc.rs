//! Pascal VOC style annotation document, one per image.

use crate::{split_extension, BoundingBox, LabelTally, PhotoRecord, WeldLabel};

pub const DEFAULT_SOURCE_DATABASE: &str = "weldLabel";
pub const ANNOTATION_EXTENSION: &str = "xml";

/// `a.jpg` is annotated by `a.xml`.
pub fn annotation_file_name(image_name: &str) -> String {
    let (stem, _) = split_extension(image_name);
    format!("{stem}.{ANNOTATION_EXTENSION}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
    pub depth: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocObject {
    pub label: WeldLabel,
    pub bounds: BoundingBox,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocAnnotation {
    pub folder: String,
    pub filename: String,
    pub path: String,
    pub database: String,
    pub size: ImageSize,
    pub objects: Vec<VocObject>,
}

impl VocAnnotation {
    /// Builds the document for `record` saved as `filename` inside `folder`,
    /// clamping every box to `size`.
    pub fn for_record(
        record: &PhotoRecord,
        folder: &str,
        filename: &str,
        path: &str,
        database: &str,
        size: ImageSize,
    ) -> Self {
        let objects = record
            .annotations
            .iter()
            .map(|annotation| VocObject {
                label: annotation.label,
                bounds: annotation.bounds.clamp(size.width, size.height),
            })
            .collect();

        Self {
            folder: folder.to_string(),
            filename: filename.to_string(),
            path: path.to_string(),
            database: database.to_string(),
            size,
            objects,
        }
    }

    pub fn tally(&self) -> LabelTally {
        let mut tally = LabelTally::default();
        for object in &self.objects {
            tally.record(object.label);
        }
        tally
    }
}
