use forget_core::traits::ICounterStore;
use forget_storage::StorageEngine;

fn engine() -> StorageEngine {
    StorageEngine::open_in_memory().unwrap()
}

// ── Plain keys ────────────────────────────────────────────────────────────

#[test]
fn get_missing_key_is_none() {
    assert_eq!(engine().get("nope").unwrap(), None);
}

#[test]
fn set_overwrites_existing_value() {
    let e = engine();
    e.set("k", "one").unwrap();
    e.set("k", "two").unwrap();
    assert_eq!(e.get("k").unwrap().as_deref(), Some("two"));
}

// ── Sorted sets ───────────────────────────────────────────────────────────

#[test]
fn increment_creates_then_accumulates() {
    let e = engine();
    assert_eq!(e.increment("s", "a", 1.0).unwrap(), 1.0);
    assert_eq!(e.increment("s", "a", 2.5).unwrap(), 3.5);
    assert_eq!(e.score("s", "a").unwrap(), Some(3.5));
}

#[test]
fn sets_are_isolated_by_name() {
    let e = engine();
    e.increment("left", "a", 1.0).unwrap();
    assert_eq!(e.score("right", "a").unwrap(), None);
    assert!(e.range_by_score_desc("right", None).unwrap().is_empty());
}

#[test]
fn range_is_descending_and_respects_limit() {
    let e = engine();
    e.increment("s", "low", 1.0).unwrap();
    e.increment("s", "high", 9.0).unwrap();
    e.increment("s", "mid", 5.0).unwrap();

    let all = e.range_by_score_desc("s", None).unwrap();
    let names: Vec<&str> = all.iter().map(|(m, _)| m.as_str()).collect();
    assert_eq!(names, vec!["high", "mid", "low"]);

    let top = e.range_by_score_desc("s", Some(2)).unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].0, "high");

    assert!(e.range_by_score_desc("s", Some(0)).unwrap().is_empty());
    assert_eq!(e.range_by_score_desc("s", Some(100)).unwrap().len(), 3);
}

#[test]
fn remove_range_is_inclusive() {
    let e = engine();
    e.increment("s", "a", 0.5).unwrap();
    e.increment("s", "b", 1.0).unwrap();
    e.increment("s", "c", 2.0).unwrap();

    let removed = e.remove_range_by_score("s", f64::NEG_INFINITY, 1.0).unwrap();
    assert_eq!(removed, 2);
    assert_eq!(e.score("s", "b").unwrap(), None);
    assert_eq!(e.score("s", "c").unwrap(), Some(2.0));
    assert_eq!(e.cardinality("s").unwrap(), 1);
}

// ── Maintenance ───────────────────────────────────────────────────────────

#[test]
fn fresh_database_is_migrated_and_intact() {
    let e = engine();
    assert_eq!(
        e.schema_version().unwrap(),
        forget_storage::migrations::LATEST_VERSION
    );
    assert!(e.integrity_check().unwrap());
}
