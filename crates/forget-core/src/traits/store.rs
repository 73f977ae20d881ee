use crate::errors::ForgetResult;

/// One operation inside a [`ICounterStore::batch`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOp {
    /// Overwrite a plain key.
    Set { key: String, value: String },
    /// Add `amount` to a member's score, creating it at 0.0 first if absent.
    Increment {
        set: String,
        member: String,
        amount: f64,
    },
    /// Multiply every score in the set by `factor`.
    ScaleScores { set: String, factor: f64 },
    /// Delete members whose score lies in `[min, max]`.
    RemoveRangeByScore { set: String, min: f64, max: f64 },
    /// Guard: abort the whole batch unless `key` currently holds `value`
    /// (`None` meaning the key is absent).
    Expect { key: String, value: Option<String> },
}

/// Result of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Every operation was applied.
    Applied { ops: usize },
    /// An `Expect` guard failed on `key`; nothing was applied.
    Conflict { key: String },
}

impl BatchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Capability surface the decay engine needs from a backing store:
/// plain keys, sorted sets keyed by name, and all-or-nothing batches.
pub trait ICounterStore: Send + Sync {
    // --- Plain keys ---
    fn get(&self, key: &str) -> ForgetResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ForgetResult<()>;

    // --- Sorted sets ---
    /// Atomically add `amount` to `member` and return the new score.
    fn increment(&self, set: &str, member: &str, amount: f64) -> ForgetResult<f64>;
    fn score(&self, set: &str, member: &str) -> ForgetResult<Option<f64>>;
    /// Members ordered by descending score. Ties are broken arbitrarily.
    fn range_by_score_desc(
        &self,
        set: &str,
        limit: Option<usize>,
    ) -> ForgetResult<Vec<(String, f64)>>;
    /// Delete members whose score lies in `[min, max]` and return how many went.
    fn remove_range_by_score(&self, set: &str, min: f64, max: f64) -> ForgetResult<usize>;

    // --- Batching ---
    fn batch(&self, ops: &[StoreOp]) -> ForgetResult<BatchOutcome>;
}
