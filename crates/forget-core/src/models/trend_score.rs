use serde::{Deserialize, Serialize};

/// Single-bin result of a trend fetch.
///
/// A missing baseline is reported as `NoBaseline`, never folded into 0.0.
/// Bulk fetches fold the same case into 0.0 instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TrendScore {
    Normalized(f64),
    NoBaseline,
}

impl TrendScore {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Normalized(v) => Some(*v),
            Self::NoBaseline => None,
        }
    }
}
