//! # forget-decay
//!
//! Decaying counter collections and the trend normalizer built on them.
//! A collection keeps one score per bin plus a lifetime and a last-decay
//! timestamp; scores are decayed lazily, all at once, when read.
//! A trend divides a fast primary collection by a baseline with twice the
//! lifetime, turning raw counts into "how hot is this right now".

pub mod collection;
pub mod formula;
mod metadata;
pub mod normalizer;

pub use collection::{DecayReport, DecayingCounterCollection};
pub use normalizer::{IncrementReport, TrendNormalizer};
