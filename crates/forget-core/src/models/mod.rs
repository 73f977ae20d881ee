pub mod bin_scores;
pub mod collection_meta;
pub mod fetch_options;
pub mod trend_score;

pub use bin_scores::BinScores;
pub use collection_meta::CollectionMeta;
pub use fetch_options::FetchOptions;
pub use trend_score::TrendScore;
