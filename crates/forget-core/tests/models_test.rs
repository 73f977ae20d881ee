use chrono::{Duration, TimeZone, Utc};
use forget_core::constants;
use forget_core::models::*;

#[test]
fn bin_scores_keep_insertion_order() {
    let scores: BinScores = vec![("b".to_string(), 3.0), ("a".to_string(), 1.0)]
        .into_iter()
        .collect();
    let bins: Vec<&str> = scores.bins().collect();
    assert_eq!(bins, vec!["b", "a"]);
    assert_eq!(scores.get("a"), Some(1.0));
    assert_eq!(scores.get("missing"), None);
}

#[test]
fn bin_scores_truncate_and_convert() {
    let mut scores = BinScores::new(vec![
        ("x".to_string(), 3.0),
        ("y".to_string(), 2.0),
        ("z".to_string(), 1.0),
    ]);
    scores.truncate(2);
    assert_eq!(scores.len(), 2);
    assert!(!scores.contains("z"));

    let map = scores.into_map();
    assert_eq!(map.get("x"), Some(&3.0));
    assert_eq!(map.len(), 2);
}

#[test]
fn collection_meta_keeps_lifetime_in_whole_seconds() {
    let meta = CollectionMeta::new("hits", Duration::days(7), Utc::now());
    assert_eq!(meta.lifetime(), Duration::days(7));
    assert_eq!(meta.lifetime_secs, 604_800);
}

#[test]
fn collection_meta_serializes_with_rfc3339_timestamp() {
    let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let meta = CollectionMeta::new("hits", Duration::seconds(60), at);
    let json = serde_json::to_value(&meta).unwrap();
    assert_eq!(json["lifetime_secs"], 60);
    assert_eq!(json["last_decayed"], "2024-01-02T03:04:05Z");
}

#[test]
fn trend_score_distinguishes_missing_baseline_from_zero() {
    assert_eq!(TrendScore::Normalized(0.0).value(), Some(0.0));
    assert_eq!(TrendScore::NoBaseline.value(), None);
    assert_ne!(TrendScore::Normalized(0.0), TrendScore::NoBaseline);
}

#[test]
fn fetch_options_default_decays_and_scrubs_everything() {
    let opts = FetchOptions::default();
    assert_eq!(opts.limit, None);
    assert!(opts.decay);
    assert!(opts.scrub);

    let raw = FetchOptions::raw().with_limit(5);
    assert!(!raw.decay && !raw.scrub);
    assert_eq!(raw.limit, Some(5));
}

#[test]
fn fetch_options_pinned_clock_wins() {
    let at = Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap();
    assert_eq!(FetchOptions::default().at(at).resolve_at(), at);
}

#[test]
fn derived_key_names() {
    assert_eq!(constants::baseline_name("trending"), "trending_2t");
    assert_eq!(constants::lifetime_key("trending"), "trending:lifetime");
    assert_eq!(constants::last_decayed_key("trending"), "trending:last_decayed");
}
