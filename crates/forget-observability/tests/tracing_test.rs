use forget_core::config::ObservabilityConfig;
use forget_observability::{events, init_tracing};

#[test]
fn second_init_keeps_existing_subscriber() {
    let config = ObservabilityConfig {
        log_level: "debug".into(),
        json_output: false,
    };
    // Another test in this binary may have won the race; either way the
    // second call must report that a subscriber is already installed.
    let _ = init_tracing(&config);
    assert!(!init_tracing(&config));
}

#[test]
fn events_emit_without_a_subscriber() {
    events::collection_created("hits", 604_800, "2024-01-01T00:00:00Z");
    events::collection_reified("hits", 604_800);
    events::decay_applied("hits", 3600.0, 0.99);
    events::bins_scrubbed("hits", 0, 1e-4);
    events::bins_scrubbed("hits", 2, 1e-4);
    events::stale_increment_dropped("hits", "home", "t0", "t1");
    events::decay_conflict("hits", 1);
}
