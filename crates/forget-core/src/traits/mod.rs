mod store;

pub use store::{BatchOutcome, ICounterStore, StoreOp};
