//! Trend normalization: a fast primary collection divided by a slow baseline.
//!
//! The baseline (`{name}_2t`) has twice the primary's lifetime and starts
//! twice as far back, so it is a longer-memory reference series. Dividing
//! primary by baseline turns an ever-growing count into a bounded "how hot
//! is this now versus its own recent history" signal.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use forget_core::config::DecayConfig;
use forget_core::constants::{baseline_name, DEFAULT_INCREMENT};
use forget_core::errors::{ForgetError, ForgetResult};
use forget_core::models::{BinScores, FetchOptions, TrendScore};
use forget_core::traits::{BatchOutcome, ICounterStore};
use forget_observability::events;

use crate::collection::DecayingCounterCollection;
use crate::formula;
use crate::metadata;

/// Whether each side accepted an increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncrementReport {
    pub primary: bool,
    pub baseline: bool,
}

/// A primary collection and its derived baseline, always built together.
#[derive(Debug)]
pub struct TrendNormalizer {
    name: String,
    primary: DecayingCounterCollection,
    baseline: DecayingCounterCollection,
}

impl TrendNormalizer {
    /// Create both collections, with `start` defaulting to `now − lifetime`.
    pub fn create(
        store: Arc<dyn ICounterStore>,
        name: &str,
        lifetime: Duration,
        start: Option<DateTime<Utc>>,
    ) -> ForgetResult<Self> {
        Self::create_at(store, name, lifetime, start, Utc::now())
    }

    /// [`create`](Self::create) with the construction clock pinned to `now`.
    ///
    /// Both collections are written in one guarded batch: either both exist
    /// afterwards or neither does.
    pub fn create_at(
        store: Arc<dyn ICounterStore>,
        name: &str,
        lifetime: Duration,
        start: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> ForgetResult<Self> {
        metadata::validate(name, lifetime)?;
        let baseline = baseline_name(name);
        let baseline_lifetime = formula::baseline_lifetime(lifetime).ok_or_else(|| {
            ForgetError::invalid(format!("trend {name}: baseline lifetime overflows"))
        })?;

        let start = match start {
            Some(start) => start,
            None => now.checked_sub_signed(lifetime).ok_or_else(|| {
                ForgetError::invalid(format!("trend {name}: default start overflows"))
            })?,
        };
        let start = metadata::storable_timestamp(start)?;
        let baseline_start = formula::baseline_start(now, start).ok_or_else(|| {
            ForgetError::invalid(format!("trend {name}: baseline start overflows"))
        })?;
        let baseline_start = metadata::storable_timestamp(baseline_start)?;

        let mut ops = metadata::creation_ops(name, lifetime, start);
        ops.extend(metadata::creation_ops(&baseline, baseline_lifetime, baseline_start));
        if let BatchOutcome::Conflict { key } = store.batch(&ops)? {
            return Err(ForgetError::invalid(format!(
                "trend {name} already exists (found {key})"
            )));
        }

        events::collection_created(
            name,
            lifetime.num_seconds(),
            &metadata::encode_timestamp(start),
        );
        events::collection_created(
            &baseline,
            baseline_lifetime.num_seconds(),
            &metadata::encode_timestamp(baseline_start),
        );

        Ok(Self {
            name: name.to_string(),
            primary: DecayingCounterCollection::from_parts(Arc::clone(&store), name, lifetime),
            baseline: DecayingCounterCollection::from_parts(store, &baseline, baseline_lifetime),
        })
    }

    /// Attach to both persisted collections. `NotFound` if either is missing;
    /// `InvalidArgument` if the baseline lifetime is not twice the primary's.
    pub fn reify(store: Arc<dyn ICounterStore>, name: &str) -> ForgetResult<Self> {
        let primary = DecayingCounterCollection::reify(Arc::clone(&store), name)?;
        let baseline = DecayingCounterCollection::reify(store, &baseline_name(name))?;

        let expected = formula::baseline_lifetime(primary.lifetime())
            .ok_or_else(|| ForgetError::invalid(format!("trend {name}: lifetime overflows")))?;
        if baseline.lifetime() != expected {
            return Err(ForgetError::invalid(format!(
                "trend {name}: baseline lifetime {}s is not {}s",
                baseline.lifetime().num_seconds(),
                expected.num_seconds()
            )));
        }

        Ok(Self {
            name: name.to_string(),
            primary,
            baseline,
        })
    }

    /// Reify-or-create, with the same rules as
    /// [`DecayingCounterCollection::open`]. A trend with only one of its two
    /// collections persisted is rejected rather than repaired.
    pub fn open(
        store: Arc<dyn ICounterStore>,
        name: &str,
        lifetime: Option<Duration>,
        start: Option<DateTime<Utc>>,
    ) -> ForgetResult<Self> {
        let Some(lifetime) = lifetime else {
            return Self::reify(store, name);
        };

        let has_primary = metadata::exists(store.as_ref(), name)?;
        let has_baseline = metadata::exists(store.as_ref(), &baseline_name(name))?;
        match (has_primary, has_baseline) {
            (false, false) => Self::create(store, name, lifetime, start),
            (true, true) => {
                let existing = Self::reify(store, name)?;
                if existing.lifetime().num_seconds() != lifetime.num_seconds() {
                    return Err(ForgetError::invalid(format!(
                        "trend {name} exists with lifetime {}s, requested {}s",
                        existing.lifetime().num_seconds(),
                        lifetime.num_seconds()
                    )));
                }
                Ok(existing)
            }
            (primary, baseline) => {
                tracing::warn!(name, primary, baseline, "trend only partially persisted");
                Err(ForgetError::invalid(format!(
                    "trend {name} is only partially persisted"
                )))
            }
        }
    }

    /// Apply a decay config to both collections.
    pub fn with_config(self, config: &DecayConfig) -> Self {
        Self {
            name: self.name,
            primary: self.primary.with_config(config),
            baseline: self.baseline.with_config(config),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The primary collection's lifetime.
    pub fn lifetime(&self) -> Duration {
        self.primary.lifetime()
    }

    pub fn primary(&self) -> &DecayingCounterCollection {
        &self.primary
    }

    pub fn baseline(&self) -> &DecayingCounterCollection {
        &self.baseline
    }

    /// Add 1.0 to `bin` on both sides, timestamped now.
    pub fn increment(&self, bin: &str) -> ForgetResult<IncrementReport> {
        self.increment_by(bin, DEFAULT_INCREMENT, Utc::now())
    }

    /// Forward to both collections. Each applies its own stale-write rule.
    pub fn increment_by(
        &self,
        bin: &str,
        amount: f64,
        at: DateTime<Utc>,
    ) -> ForgetResult<IncrementReport> {
        Ok(IncrementReport {
            primary: self.primary.increment_by(bin, amount, at)?,
            baseline: self.baseline.increment_by(bin, amount, at)?,
        })
    }

    /// Same decay target for both sides.
    fn split(opts: FetchOptions) -> (FetchOptions, FetchOptions) {
        let pinned = FetchOptions {
            at: Some(opts.resolve_at()),
            ..opts
        };
        let baseline = FetchOptions {
            limit: None,
            ..pinned
        };
        (pinned, baseline)
    }

    /// Normalized scores for the primary's top `opts.limit` bins.
    ///
    /// Entries keep the primary's descending raw-score order; they are not
    /// re-sorted by normalized value. A bin missing from the baseline
    /// normalizes to 0.0.
    pub fn fetch(&self, opts: FetchOptions) -> ForgetResult<BinScores> {
        let (primary_opts, baseline_opts) = Self::split(opts);
        let counts = self.primary.fetch(primary_opts)?;
        let norms: HashMap<String, f64> = self.baseline.fetch(baseline_opts)?.into_map();

        Ok(counts
            .into_vec()
            .into_iter()
            .map(|(bin, count)| {
                let normalized = formula::normalize(count, norms.get(&bin).copied()).unwrap_or(0.0);
                (bin, normalized)
            })
            .collect())
    }

    /// Normalized score for one bin.
    ///
    /// `None` when the primary has no score for `bin`; `NoBaseline` when the
    /// primary does but the baseline does not. Unlike [`fetch`](Self::fetch),
    /// a missing baseline is never folded into 0.0 here.
    pub fn fetch_bin(&self, bin: &str, opts: FetchOptions) -> ForgetResult<Option<TrendScore>> {
        let (primary_opts, baseline_opts) = Self::split(opts);
        let count = self.primary.fetch_bin(bin, primary_opts)?;
        let norm = self.baseline.fetch_bin(bin, baseline_opts)?;

        Ok(count.map(|count| match formula::normalize(count, norm) {
            Some(ratio) => TrendScore::Normalized(ratio),
            None => TrendScore::NoBaseline,
        }))
    }
}
