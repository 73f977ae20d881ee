//! Persisted collection metadata: key layout and value encoding.
//!
//! `lifetime` is whole seconds; `last_decayed` is RFC 3339 with
//! microsecond precision. Stored timestamps double as optimistic-lock
//! tokens, so every timestamp is truncated to microseconds before use.

use chrono::{DateTime, Datelike, Duration, SecondsFormat, SubsecRound, Utc};

use forget_core::constants::{
    last_decayed_key, lifetime_key, MAX_LIFETIME_SECS, MAX_TIMESTAMP_YEAR, MIN_TIMESTAMP_YEAR,
};
use forget_core::errors::{ForgetError, ForgetResult};
use forget_core::models::CollectionMeta;
use forget_core::traits::{ICounterStore, StoreOp};

pub(crate) fn normalize_timestamp(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(6)
}

/// Normalize a timestamp that is about to be persisted as `last_decayed`.
///
/// Years outside 0000..=9999 have no RFC 3339 form that parses back, so they
/// are rejected before anything is written.
pub(crate) fn storable_timestamp(at: DateTime<Utc>) -> ForgetResult<DateTime<Utc>> {
    let year = at.year();
    if !(MIN_TIMESTAMP_YEAR..=MAX_TIMESTAMP_YEAR).contains(&year) {
        return Err(ForgetError::invalid(format!(
            "timestamp year {year} is outside {MIN_TIMESTAMP_YEAR}..={MAX_TIMESTAMP_YEAR}"
        )));
    }
    Ok(normalize_timestamp(at))
}

pub(crate) fn encode_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(key: &str, raw: &str) -> ForgetResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| ForgetError::CorruptMetadata {
            key: key.to_string(),
            value: raw.to_string(),
        })
}

fn decode_lifetime(key: &str, raw: &str) -> ForgetResult<Duration> {
    match raw.parse::<i64>() {
        Ok(secs) if (1..=MAX_LIFETIME_SECS).contains(&secs) => Ok(Duration::seconds(secs)),
        _ => Err(ForgetError::CorruptMetadata {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Reject names and lifetimes a collection cannot be built from.
pub(crate) fn validate(name: &str, lifetime: Duration) -> ForgetResult<()> {
    if name.is_empty() {
        return Err(ForgetError::invalid("collection name must not be empty"));
    }
    let secs = lifetime.num_seconds();
    if !(1..=MAX_LIFETIME_SECS).contains(&secs) {
        return Err(ForgetError::invalid(format!(
            "lifetime must be between 1s and {MAX_LIFETIME_SECS}s, got {secs}s"
        )));
    }
    Ok(())
}

/// Guarded writes that create a collection. The guard fails the batch
/// when a lifetime is already stored under `name`.
pub(crate) fn creation_ops(name: &str, lifetime: Duration, start: DateTime<Utc>) -> Vec<StoreOp> {
    let lifetime_key = lifetime_key(name);
    vec![
        StoreOp::Expect {
            key: lifetime_key.clone(),
            value: None,
        },
        StoreOp::Set {
            key: lifetime_key,
            value: lifetime.num_seconds().to_string(),
        },
        StoreOp::Set {
            key: last_decayed_key(name),
            value: encode_timestamp(start),
        },
    ]
}

pub(crate) fn exists(store: &dyn ICounterStore, name: &str) -> ForgetResult<bool> {
    Ok(store.get(&lifetime_key(name))?.is_some())
}

/// Load both metadata values. `None` when either is missing.
pub(crate) fn load(store: &dyn ICounterStore, name: &str) -> ForgetResult<Option<CollectionMeta>> {
    let lifetime_key = lifetime_key(name);
    let Some(raw_lifetime) = store.get(&lifetime_key)? else {
        return Ok(None);
    };
    let Some((_, last_decayed)) = read_last_decayed(store, name)? else {
        return Ok(None);
    };
    let lifetime = decode_lifetime(&lifetime_key, &raw_lifetime)?;
    Ok(Some(CollectionMeta::new(name, lifetime, last_decayed)))
}

/// The raw stored `last_decayed` value (the lock token) and its decoded form.
pub(crate) fn read_last_decayed(
    store: &dyn ICounterStore,
    name: &str,
) -> ForgetResult<Option<(String, DateTime<Utc>)>> {
    let key = last_decayed_key(name);
    match store.get(&key)? {
        Some(raw) => {
            let at = decode_timestamp(&key, &raw)?;
            Ok(Some((raw, at)))
        }
        None => Ok(None),
    }
}
