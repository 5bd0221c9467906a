use serde::{Deserialize, Serialize};

/// Raw label values that count as an acceptable weld. Everything else,
/// including a missing label, is treated as a defect.
pub const GOOD_RAW_LABELS: [&str; 2] = ["OK", "ACCETTABILE"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeldLabel {
    Good,
    Bad,
}

impl WeldLabel {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if GOOD_RAW_LABELS.contains(&value) => Self::Good,
            _ => Self::Bad,
        }
    }

    /// Class name written into annotation files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good_weld",
            Self::Bad => "bad_weld",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelTally {
    pub good: usize,
    pub bad: usize,
}

impl LabelTally {
    pub fn record(&mut self, label: WeldLabel) {
        match label {
            WeldLabel::Good => self.good += 1,
            WeldLabel::Bad => self.bad += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.good + self.bad
    }
}

impl std::ops::AddAssign for LabelTally {
    fn add_assign(&mut self, other: Self) {
        self.good += other.good;
        self.bad += other.bad;
    }
}
