mod annotation;
mod dedup;
mod error;
mod label;
mod naming;
mod photo;
mod split;
mod timestamp;
mod voc;

pub use annotation::{Annotation, BoundingBox};
pub use dedup::{deduplicate, TimeOrdered, DEFAULT_DUPLICATE_WINDOW};
pub use error::DomainError;
pub use label::{LabelTally, WeldLabel, GOOD_RAW_LABELS};
pub use naming::{split_extension, unique_photo_name};
pub use photo::{BlobHandle, PhotoId, PhotoRecord};
pub use split::{split, DatasetSplit, ValRatio};
pub use timestamp::parse_timestamp;
pub use voc::{
    annotation_file_name, ImageSize, VocAnnotation, VocObject, ANNOTATION_EXTENSION,
    DEFAULT_SOURCE_DATABASE,
};
