//! Racing decays against a shared file-backed store.

use std::sync::{Arc, Barrier};
use std::thread;

use chrono::{DateTime, Duration, TimeZone, Utc};
use forget_core::traits::ICounterStore;
use forget_core::FetchOptions;
use forget_decay::DecayingCounterCollection;
use forget_storage::StorageEngine;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

#[test]
fn racing_decays_apply_the_factor_once() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn ICounterStore> =
        Arc::new(StorageEngine::open(&dir.path().join("race.db")).unwrap());
    let c = DecayingCounterCollection::create(Arc::clone(&store), "race", Duration::hours(1), Some(t0()))
        .unwrap();
    c.increment_by("b", 1.0, t0() + Duration::seconds(1)).unwrap();

    let target = t0() + Duration::hours(1);
    let barrier = Arc::new(Barrier::new(4));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let handle = DecayingCounterCollection::reify(store, "race").unwrap();
                barrier.wait();
                handle.decay_at(target)
            })
        })
        .collect();
    for h in handles {
        // A loser either retries into a no-op or, if it read the clock after
        // the winner committed, sees nothing left to do.
        h.join().unwrap().unwrap();
    }

    let score = c.fetch_bin("b", FetchOptions::raw()).unwrap().unwrap();
    assert!((score - (-1.0f64).exp()).abs() < 1e-9, "score {score}");
    assert_eq!(c.meta().unwrap().last_decayed, target);
}

#[test]
fn increments_racing_a_decay_are_never_lost_or_double_decayed() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn ICounterStore> =
        Arc::new(StorageEngine::open(&dir.path().join("mixed.db")).unwrap());
    let start = Utc::now() - Duration::hours(1);
    let c = DecayingCounterCollection::create(Arc::clone(&store), "mixed", Duration::days(365), Some(start))
        .unwrap();

    let writers: Vec<_> = (0..3)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let handle = DecayingCounterCollection::reify(store, "mixed").unwrap();
                let mut applied = 0;
                for _ in 0..20 {
                    if handle.increment_by("hot", 1.0, Utc::now() + Duration::hours(1)).unwrap() {
                        applied += 1;
                    }
                }
                applied
            })
        })
        .collect();
    c.decay().unwrap();

    let applied: i32 = writers.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(applied, 60);
    // One year lifetime: an hour of decay barely moves the total.
    let score = c.fetch_bin("hot", FetchOptions::raw()).unwrap().unwrap();
    assert!(score <= 60.0 && score > 59.9, "score {score}");
}
