//! Search orchestration: fan-out, caching and merging.

pub mod aggregator;
pub mod cache;

pub use aggregator::{count_by_source, AggregatorConfig, JobAggregator};
