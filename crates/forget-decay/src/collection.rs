//! A named set of bins whose scores decay exponentially with time.
//!
//! Only two scalars of metadata are kept per collection: the lifetime (the
//! exponential time constant) and `last_decayed`. Decay is applied to every
//! bin at once, lazily, when the collection is read. Nothing is cached in
//! process: every read and write goes to the backing store.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use forget_core::config::DecayConfig;
use forget_core::constants::{last_decayed_key, DEFAULT_INCREMENT};
use forget_core::errors::{ForgetError, ForgetResult};
use forget_core::models::{BinScores, CollectionMeta, FetchOptions};
use forget_core::traits::{BatchOutcome, ICounterStore, StoreOp};
use forget_observability::events;

use crate::formula;
use crate::metadata;

/// What one decay pass did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayReport {
    /// Seconds between the previous `last_decayed` and the decay target.
    pub elapsed_secs: f64,
    /// Factor every score was multiplied by. 1.0 when nothing elapsed.
    pub factor: f64,
}

impl DecayReport {
    fn unchanged() -> Self {
        Self {
            elapsed_secs: 0.0,
            factor: 1.0,
        }
    }
}

/// Handle on one persisted decaying counter collection.
///
/// The handle holds the immutable lifetime and the store; bins and
/// `last_decayed` live only in the store.
pub struct DecayingCounterCollection {
    store: Arc<dyn ICounterStore>,
    name: String,
    lifetime: Duration,
    scrub_threshold: f64,
    max_retries: u32,
}

impl std::fmt::Debug for DecayingCounterCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecayingCounterCollection")
            .field("name", &self.name)
            .field("lifetime_secs", &self.lifetime.num_seconds())
            .field("scrub_threshold", &self.scrub_threshold)
            .finish()
    }
}

impl DecayingCounterCollection {
    /// Create a fresh collection with `last_decayed = start` (default now).
    ///
    /// Fails with `InvalidArgument` when a collection of the same name
    /// already exists; use [`reify`](Self::reify) or [`open`](Self::open)
    /// to attach to existing data.
    pub fn create(
        store: Arc<dyn ICounterStore>,
        name: &str,
        lifetime: Duration,
        start: Option<DateTime<Utc>>,
    ) -> ForgetResult<Self> {
        metadata::validate(name, lifetime)?;
        let start = metadata::storable_timestamp(start.unwrap_or_else(Utc::now))?;

        match store.batch(&metadata::creation_ops(name, lifetime, start))? {
            BatchOutcome::Applied { .. } => {}
            BatchOutcome::Conflict { .. } => {
                return Err(ForgetError::invalid(format!(
                    "collection {name} already exists"
                )))
            }
        }
        events::collection_created(
            name,
            lifetime.num_seconds(),
            &metadata::encode_timestamp(start),
        );
        Ok(Self::from_parts(store, name, lifetime))
    }

    /// Attach to a persisted collection. `NotFound` when it has no metadata.
    pub fn reify(store: Arc<dyn ICounterStore>, name: &str) -> ForgetResult<Self> {
        let meta = metadata::load(store.as_ref(), name)?
            .ok_or_else(|| ForgetError::not_found(name))?;
        events::collection_reified(name, meta.lifetime_secs);
        Ok(Self::from_parts(store, name, meta.lifetime()))
    }

    /// Reify-or-create.
    ///
    /// - `lifetime: None` reifies (and fails with `NotFound` if missing).
    /// - `lifetime: Some` on a missing collection creates it.
    /// - `lifetime: Some` on an existing collection reifies it when the
    ///   stored lifetime matches, else fails with `InvalidArgument`.
    pub fn open(
        store: Arc<dyn ICounterStore>,
        name: &str,
        lifetime: Option<Duration>,
        start: Option<DateTime<Utc>>,
    ) -> ForgetResult<Self> {
        let Some(lifetime) = lifetime else {
            return Self::reify(store, name);
        };
        if !metadata::exists(store.as_ref(), name)? {
            tracing::debug!(name, "no persisted collection, creating");
            return Self::create(store, name, lifetime, start);
        }
        let existing = Self::reify(store, name)?;
        if existing.lifetime.num_seconds() != lifetime.num_seconds() {
            return Err(ForgetError::invalid(format!(
                "collection {name} exists with lifetime {}s, requested {}s",
                existing.lifetime.num_seconds(),
                lifetime.num_seconds()
            )));
        }
        Ok(existing)
    }

    /// Handle on metadata the caller has already written or verified.
    pub(crate) fn from_parts(store: Arc<dyn ICounterStore>, name: &str, lifetime: Duration) -> Self {
        let defaults = DecayConfig::default();
        Self {
            store,
            name: name.to_string(),
            lifetime: Duration::seconds(lifetime.num_seconds()),
            scrub_threshold: defaults.scrub_threshold,
            max_retries: defaults.max_decay_retries,
        }
    }

    /// Override the scrub threshold and retry bound.
    pub fn with_config(mut self, config: &DecayConfig) -> Self {
        self.scrub_threshold = config.scrub_threshold;
        self.max_retries = config.max_decay_retries.max(1);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    pub fn scrub_threshold(&self) -> f64 {
        self.scrub_threshold
    }

    /// Current persisted metadata.
    pub fn meta(&self) -> ForgetResult<CollectionMeta> {
        metadata::load(self.store.as_ref(), &self.name)?
            .ok_or_else(|| ForgetError::not_found(&self.name))
    }

    fn read_clock(&self) -> ForgetResult<(String, DateTime<Utc>)> {
        metadata::read_last_decayed(self.store.as_ref(), &self.name)?
            .ok_or_else(|| ForgetError::not_found(&self.name))
    }

    /// Add 1.0 to `bin`, timestamped now.
    pub fn increment(&self, bin: &str) -> ForgetResult<bool> {
        self.increment_by(bin, DEFAULT_INCREMENT, Utc::now())
    }

    /// Add `amount` to `bin` if `at` is after `last_decayed`.
    ///
    /// Returns false when the increment was dropped as stale. Such an
    /// increment would be decayed as if it had existed since
    /// `last_decayed`, so it is discarded rather than applied.
    pub fn increment_by(&self, bin: &str, amount: f64, at: DateTime<Utc>) -> ForgetResult<bool> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ForgetError::invalid(format!(
                "increment amount must be finite and >= 0, got {amount}"
            )));
        }
        let at = metadata::normalize_timestamp(at);

        for attempt in 1..=self.max_retries {
            let (token, last_decayed) = self.read_clock()?;
            if at <= last_decayed {
                events::stale_increment_dropped(
                    &self.name,
                    bin,
                    &metadata::encode_timestamp(at),
                    &token,
                );
                return Ok(false);
            }

            let ops = [
                StoreOp::Expect {
                    key: last_decayed_key(&self.name),
                    value: Some(token),
                },
                StoreOp::Increment {
                    set: self.name.clone(),
                    member: bin.to_string(),
                    amount,
                },
            ];
            match self.store.batch(&ops)? {
                BatchOutcome::Applied { .. } => return Ok(true),
                BatchOutcome::Conflict { .. } => events::decay_conflict(&self.name, attempt),
            }
        }

        Err(ForgetError::DecayConflict {
            name: self.name.clone(),
            attempts: self.max_retries,
        })
    }

    /// Decay every bin to now.
    pub fn decay(&self) -> ForgetResult<DecayReport> {
        self.decay_at(Utc::now())
    }

    /// Decay every bin to `at` and advance `last_decayed` to `at`.
    ///
    /// `at` before `last_decayed`, or outside years 0000..=9999, is rejected
    /// with `InvalidArgument`; `at` equal to `last_decayed` changes nothing.
    pub fn decay_at(&self, at: DateTime<Utc>) -> ForgetResult<DecayReport> {
        self.decay_to(metadata::storable_timestamp(at)?, true)
    }

    /// One optimistic decay pass, retried while a concurrent decay wins the race.
    ///
    /// The scale and the clock advance are one guarded batch, so two racing
    /// decays can never both apply a factor for the same interval.
    fn decay_to(&self, at: DateTime<Utc>, strict: bool) -> ForgetResult<DecayReport> {
        let lifetime_secs = self.lifetime.num_seconds();

        for attempt in 1..=self.max_retries {
            let (token, last_decayed) = self.read_clock()?;
            if at < last_decayed && strict && attempt == 1 {
                return Err(ForgetError::invalid(format!(
                    "cannot decay {} backwards to {} (last decayed {token})",
                    self.name,
                    metadata::encode_timestamp(at)
                )));
            }
            if at <= last_decayed {
                return Ok(DecayReport::unchanged());
            }

            let elapsed_secs = formula::elapsed_secs(last_decayed, at);
            let factor = formula::decay_factor(elapsed_secs, lifetime_secs);
            let ops = [
                StoreOp::Expect {
                    key: last_decayed_key(&self.name),
                    value: Some(token),
                },
                StoreOp::ScaleScores {
                    set: self.name.clone(),
                    factor,
                },
                StoreOp::Set {
                    key: last_decayed_key(&self.name),
                    value: metadata::encode_timestamp(at),
                },
            ];
            match self.store.batch(&ops)? {
                BatchOutcome::Applied { .. } => {
                    events::decay_applied(&self.name, elapsed_secs, factor);
                    return Ok(DecayReport {
                        elapsed_secs,
                        factor,
                    });
                }
                BatchOutcome::Conflict { .. } => events::decay_conflict(&self.name, attempt),
            }
        }

        Err(ForgetError::DecayConflict {
            name: self.name.clone(),
            attempts: self.max_retries,
        })
    }

    /// Delete every bin whose score is at or below the scrub threshold.
    pub fn scrub(&self) -> ForgetResult<usize> {
        let removed =
            self.store
                .remove_range_by_score(&self.name, f64::NEG_INFINITY, self.scrub_threshold)?;
        events::bins_scrubbed(&self.name, removed, self.scrub_threshold);
        Ok(removed)
    }

    /// Decay and scrub as requested. A decay target at or before
    /// `last_decayed` (clock skew between readers) is skipped, not rejected.
    fn prepare(&self, opts: &FetchOptions) -> ForgetResult<()> {
        if opts.decay {
            self.decay_to(metadata::storable_timestamp(opts.resolve_at())?, false)?;
        }
        if opts.scrub {
            self.scrub()?;
        }
        Ok(())
    }

    /// Top `opts.limit` bins by descending score.
    pub fn fetch(&self, opts: FetchOptions) -> ForgetResult<BinScores> {
        self.prepare(&opts)?;
        let entries = self.store.range_by_score_desc(&self.name, opts.limit)?;
        Ok(BinScores::new(entries))
    }

    /// One bin's score, or `None` if it was never incremented or has been
    /// scrubbed away. The two cases are deliberately indistinguishable.
    pub fn fetch_bin(&self, bin: &str, opts: FetchOptions) -> ForgetResult<Option<f64>> {
        self.prepare(&opts)?;
        self.store.score(&self.name, bin)
    }
}
