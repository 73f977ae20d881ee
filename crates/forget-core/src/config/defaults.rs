// Single source of truth for all default values.

use crate::constants;

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "forget.db";
pub const DEFAULT_WAL_MODE: bool = true;
pub const DEFAULT_CACHE_SIZE: i64 = -64_000; // 64 MB (negative = KB)
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Decay ---
pub const DEFAULT_SCRUB_THRESHOLD: f64 = constants::DEFAULT_SCRUB_THRESHOLD;
pub const DEFAULT_MAX_DECAY_RETRIES: u32 = 3;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_OUTPUT: bool = true;
