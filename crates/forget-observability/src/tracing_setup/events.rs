//! Structured log events for key decay operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// A collection was created fresh.
pub fn collection_created(name: &str, lifetime_secs: i64, last_decayed: &str) {
    tracing::info!(
        event = "collection_created",
        name = %name,
        lifetime_secs,
        last_decayed = %last_decayed,
        "collection created"
    );
}

/// A collection was loaded from persisted metadata.
pub fn collection_reified(name: &str, lifetime_secs: i64) {
    tracing::debug!(
        event = "collection_reified",
        name = %name,
        lifetime_secs,
        "collection reified"
    );
}

/// Decay was applied to every bin of a collection.
pub fn decay_applied(name: &str, elapsed_secs: f64, factor: f64) {
    tracing::debug!(
        event = "decay_applied",
        name = %name,
        elapsed_secs,
        factor,
        "decay applied"
    );
}

/// Scrub removed near-zero bins.
pub fn bins_scrubbed(name: &str, removed: usize, threshold: f64) {
    if removed > 0 {
        tracing::debug!(
            event = "bins_scrubbed",
            name = %name,
            removed,
            threshold,
            "bins scrubbed"
        );
    }
}

/// An increment older than the last decay was dropped.
pub fn stale_increment_dropped(name: &str, bin: &str, at: &str, last_decayed: &str) {
    tracing::debug!(
        event = "stale_increment_dropped",
        name = %name,
        bin = %bin,
        at = %at,
        last_decayed = %last_decayed,
        "stale increment dropped"
    );
}

/// A guarded write lost to a concurrent decay and will be retried.
pub fn decay_conflict(name: &str, attempt: u32) {
    tracing::warn!(
        event = "decay_conflict",
        name = %name,
        attempt,
        "concurrent decay detected, retrying"
    );
}
