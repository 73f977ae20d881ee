/// Forget table version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Scores at or below this value are considered decayed to irrelevance.
pub const DEFAULT_SCRUB_THRESHOLD: f64 = 1e-4;

/// Suffix appended to a trend name to derive its baseline collection.
pub const BASELINE_SUFFIX: &str = "_2t";

/// Baseline lifetime as a multiple of the primary lifetime.
pub const BASELINE_LIFETIME_FACTOR: i32 = 2;

/// Longest accepted lifetime: 1000 years. Keeps a baseline's doubled
/// lifetime and start inside the representable timestamp range.
pub const MAX_LIFETIME_SECS: i64 = 1_000 * 365 * 86_400;

/// Stored timestamps must fall in these years, the range RFC 3339 can encode.
pub const MIN_TIMESTAMP_YEAR: i32 = 0;
pub const MAX_TIMESTAMP_YEAR: i32 = 9999;

/// Metadata key suffix holding a collection's lifetime (whole seconds).
pub const LIFETIME_KEY_SUFFIX: &str = ":lifetime";

/// Metadata key suffix holding a collection's last decay timestamp (RFC 3339).
pub const LAST_DECAYED_KEY_SUFFIX: &str = ":last_decayed";

/// Amount added by a plain `increment`.
pub const DEFAULT_INCREMENT: f64 = 1.0;

/// Metadata key for a collection's lifetime.
pub fn lifetime_key(name: &str) -> String {
    format!("{name}{LIFETIME_KEY_SUFFIX}")
}

/// Metadata key for a collection's last decay timestamp.
pub fn last_decayed_key(name: &str) -> String {
    format!("{name}{LAST_DECAYED_KEY_SUFFIX}")
}

/// Name of the baseline collection paired with the trend `name`.
pub fn baseline_name(name: &str) -> String {
    format!("{name}{BASELINE_SUFFIX}")
}
