//! Typed view of the per-photo metadata documents.

use labelset_domain::{Annotation, BoundingBox, WeldLabel};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoDocument {
    #[serde(default)]
    processed: Option<bool>,
    #[serde(default)]
    annotations: Vec<AnnotationDocument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnnotationDocument {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    current_label: Option<String>,
    #[serde(deserialize_with = "coordinate")]
    x_left: i64,
    #[serde(deserialize_with = "coordinate")]
    y_top: i64,
    #[serde(deserialize_with = "coordinate")]
    x_right: i64,
    #[serde(deserialize_with = "coordinate")]
    y_bottom: i64,
    #[serde(default)]
    reviewed: Option<bool>,
}

impl PhotoDocument {
    pub fn is_processed(&self) -> bool {
        self.processed.unwrap_or(false)
    }

    pub fn annotation_count(&self) -> usize {
        self.annotations.len()
    }

    pub fn has_reviewed_annotation(&self) -> bool {
        self.annotations.iter().any(AnnotationDocument::is_reviewed)
    }

    pub fn into_annotations(self) -> Vec<Annotation> {
        self.annotations
            .into_iter()
            .map(AnnotationDocument::into_annotation)
            .collect()
    }
}

impl AnnotationDocument {
    fn is_reviewed(&self) -> bool {
        self.reviewed.unwrap_or(false)
    }

    /// `label` wins unless it is missing or blank, then `current_label`.
    fn raw_label(&self) -> Option<&str> {
        self.label
            .as_deref()
            .filter(|label| !label.is_empty())
            .or(self.current_label.as_deref())
    }

    fn into_annotation(self) -> Annotation {
        Annotation {
            label: WeldLabel::from_raw(self.raw_label()),
            bounds: BoundingBox::new(self.x_left, self.y_top, self.x_right, self.y_bottom),
            reviewed: self.is_reviewed(),
        }
    }
}

fn coordinate<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() {
        return Err(D::Error::custom("coordinate must be finite"));
    }
    Ok(value.round() as i64)
}
