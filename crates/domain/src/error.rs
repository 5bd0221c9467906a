use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("photo id must not be empty")]
    EmptyPhotoId,
    #[error("validation ratio must be within [0, 1], got {0}")]
    InvalidRatio(f64),
}
