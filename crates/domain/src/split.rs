use serde::{Deserialize, Serialize};

use crate::{DomainError, PhotoRecord};

/// Share of records routed to the validation set, within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ValRatio(f64);

impl ValRatio {
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(DomainError::InvalidRatio(value));
        }
        Ok(Self(value))
    }

    /// Whole-percent ratio for built-in defaults; anything above 100 is 100.
    pub fn from_percent(percent: u8) -> Self {
        Self(f64::from(percent.min(100)) / 100.0)
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Validation-set size for `len` records, truncated toward zero.
    pub fn val_count(self, len: usize) -> usize {
        ((len as f64) * self.0).floor() as usize
    }
}

impl TryFrom<f64> for ValRatio {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ValRatio> for f64 {
    fn from(value: ValRatio) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetSplit {
    pub train: Vec<PhotoRecord>,
    pub val: Vec<PhotoRecord>,
}

impl DatasetSplit {
    /// Appends another split, keeping train and val apart.
    pub fn extend(&mut self, other: DatasetSplit) {
        self.train.extend(other.train);
        self.val.extend(other.val);
    }
}

/// Positional split: the first `floor(len * ratio)` records become the
/// validation set. Callers shuffle beforehand.
pub fn split(mut records: Vec<PhotoRecord>, ratio: ValRatio) -> DatasetSplit {
    let val_count = ratio.val_count(records.len()).min(records.len());
    let train = records.split_off(val_count);
    DatasetSplit {
        train,
        val: records,
    }
}
