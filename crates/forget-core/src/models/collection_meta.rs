use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Persisted metadata of one decaying counter collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionMeta {
    pub name: String,
    /// Exponential time constant, whole seconds.
    pub lifetime_secs: i64,
    /// When decay was last applied. Only moves forward.
    pub last_decayed: DateTime<Utc>,
}

impl CollectionMeta {
    pub fn new(name: impl Into<String>, lifetime: Duration, last_decayed: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            lifetime_secs: lifetime.num_seconds(),
            last_decayed,
        }
    }

    pub fn lifetime(&self) -> Duration {
        Duration::seconds(self.lifetime_secs)
    }
}
