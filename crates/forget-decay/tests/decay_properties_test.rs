use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use forget_core::traits::ICounterStore;
use forget_core::FetchOptions;
use forget_decay::DecayingCounterCollection;
use forget_storage::StorageEngine;
use proptest::prelude::*;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

fn collection(lifetime_secs: i64) -> DecayingCounterCollection {
    let store: Arc<dyn ICounterStore> = Arc::new(StorageEngine::open_in_memory().unwrap());
    DecayingCounterCollection::create(store, "p", Duration::seconds(lifetime_secs), Some(t0()))
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn decay_never_increases_a_score(
        amount in 0.01f64..1e6,
        lifetime_secs in 1i64..10_000_000,
        steps in proptest::collection::vec(1i64..1_000_000, 1..5),
    ) {
        let c = collection(lifetime_secs);
        c.increment_by("b", amount, t0() + Duration::seconds(1)).unwrap();

        let mut at = t0();
        let mut prev = amount;
        for step in steps {
            at += Duration::seconds(step);
            c.decay_at(at).unwrap();
            let score = c.fetch_bin("b", FetchOptions::raw()).unwrap().unwrap_or(0.0);
            prop_assert!(score <= prev);
            prop_assert!(score >= 0.0);
            prev = score;
        }
    }

    #[test]
    fn piecewise_decay_matches_one_shot_decay(
        lifetime_secs in 60i64..1_000_000,
        split in 1i64..100_000,
        rest in 1i64..100_000,
    ) {
        let stepwise = collection(lifetime_secs);
        let oneshot = collection(lifetime_secs);
        for c in [&stepwise, &oneshot] {
            c.increment_by("b", 100.0, t0() + Duration::milliseconds(1)).unwrap();
        }

        stepwise.decay_at(t0() + Duration::seconds(split)).unwrap();
        stepwise.decay_at(t0() + Duration::seconds(split + rest)).unwrap();
        oneshot.decay_at(t0() + Duration::seconds(split + rest)).unwrap();

        let a = stepwise.fetch_bin("b", FetchOptions::raw()).unwrap().unwrap();
        let b = oneshot.fetch_bin("b", FetchOptions::raw()).unwrap().unwrap();
        prop_assert!((a - b).abs() <= 1e-9 * b.max(1.0));
    }

    #[test]
    fn fetch_never_exceeds_limit(
        bins in 0usize..25,
        limit in 0usize..30,
    ) {
        let c = collection(3600);
        for i in 0..bins {
            c.increment_by(&format!("b{i}"), (i + 1) as f64, t0() + Duration::seconds(1)).unwrap();
        }

        let fetched = c.fetch(FetchOptions::raw().with_limit(limit)).unwrap();
        prop_assert_eq!(fetched.len(), limit.min(bins));
    }

    #[test]
    fn stale_increments_change_nothing(
        amount in 0.01f64..100.0,
        back in 0i64..1_000_000,
    ) {
        let c = collection(3600);
        c.increment_by("b", 1.0, t0() + Duration::seconds(1)).unwrap();
        let before = c.fetch(FetchOptions::raw()).unwrap();
        let meta = c.meta().unwrap();

        let applied = c.increment_by("b", amount, t0() - Duration::seconds(back)).unwrap();
        prop_assert!(!applied);
        prop_assert_eq!(c.fetch(FetchOptions::raw()).unwrap(), before);
        prop_assert_eq!(c.meta().unwrap(), meta);
    }

    #[test]
    fn fetch_never_returns_scores_at_or_below_threshold(
        scores in proptest::collection::vec(0.0f64..2e-4, 1..20),
    ) {
        let c = collection(3600);
        for (i, score) in scores.iter().enumerate() {
            c.increment_by(&format!("b{i}"), *score, t0() + Duration::seconds(1)).unwrap();
        }

        let kept = c
            .fetch(FetchOptions { decay: false, ..FetchOptions::default() })
            .unwrap();
        let expected = scores.iter().filter(|s| **s > 1e-4).count();
        prop_assert_eq!(kept.len(), expected);
        prop_assert!(kept.iter().all(|(_, s)| s > 1e-4));
    }
}
