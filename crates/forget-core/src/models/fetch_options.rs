use chrono::{DateTime, Utc};

/// Options shared by bulk and single-bin fetches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchOptions {
    /// Maximum number of bins returned. `None` returns everything.
    pub limit: Option<usize>,
    /// Decay the collection before reading.
    pub decay: bool,
    /// Scrub near-zero bins before reading.
    pub scrub: bool,
    /// Decay target. `None` means the wall clock at call time.
    pub at: Option<DateTime<Utc>>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            limit: None,
            decay: true,
            scrub: true,
            at: None,
        }
    }
}

impl FetchOptions {
    /// Read the stored scores as they are, without decay or scrub.
    pub fn raw() -> Self {
        Self {
            decay: false,
            scrub: false,
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn at(mut self, at: DateTime<Utc>) -> Self {
        self.at = Some(at);
        self
    }

    pub fn resolve_at(&self) -> DateTime<Utc> {
        self.at.unwrap_or_else(Utc::now)
    }
}
