use chrono::{DateTime, Duration, Utc};

use forget_core::constants::BASELINE_LIFETIME_FACTOR;

/// Multiplicative decay factor: `exp(-elapsed / lifetime)`.
///
/// Elapsed time of zero gives exactly 1.0.
pub fn decay_factor(elapsed_secs: f64, lifetime_secs: i64) -> f64 {
    let rate = 1.0 / lifetime_secs as f64;
    (-elapsed_secs * rate).exp()
}

/// Seconds from `from` to `to`, with microsecond resolution. Negative when
/// `to` precedes `from`.
pub fn elapsed_secs(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to - from;
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1e6,
        None => delta.num_milliseconds() as f64 / 1e3,
    }
}

/// Start of the baseline so that its age at `now` is twice the primary's.
///
/// ```text
/// baselineStart = now − 2 × (now − start)
/// ```
///
/// `None` when the result is not a representable timestamp.
pub fn baseline_start(now: DateTime<Utc>, start: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let age = now.signed_duration_since(start);
    now.checked_sub_signed(age.checked_mul(BASELINE_LIFETIME_FACTOR)?)
}

/// Baseline lifetime for a primary lifetime, `None` on overflow.
pub fn baseline_lifetime(lifetime: Duration) -> Option<Duration> {
    lifetime.checked_mul(BASELINE_LIFETIME_FACTOR)
}

/// Primary over baseline, or `None` when there is no usable baseline.
pub fn normalize(primary: f64, baseline: Option<f64>) -> Option<f64> {
    match baseline {
        Some(b) if b > 0.0 => Some(primary / b),
        _ => None,
    }
}
