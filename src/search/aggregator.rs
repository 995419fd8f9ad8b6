//! Multi-source job aggregation.
//!
//! A search fans out to every enabled source at once, waits for all of
//! them, then merges: concatenate in source order, drop duplicates, sort
//! newest first. A failing source only removes its own contribution.

use super::cache::{cache_key, Clock, SearchCache, SystemClock, DEFAULT_TTL};
use crate::models::{JobSearchParams, JobSource, ScrapedJob, DEFAULT_LIMIT};
use crate::provider::SearchProvider;
use crate::sources::DEFAULT_SOURCES;
use futures::future::join_all;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Settings for a [`JobAggregator`].
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Sources queried by `search`, in merge order.
    pub sources: Vec<JobSource>,
    /// Result limit used when the request sets none.
    pub default_limit: usize,
    /// Lifetime of cached per-source results.
    pub cache_ttl: Duration,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            sources: DEFAULT_SOURCES.to_vec(),
            default_limit: DEFAULT_LIMIT,
            cache_ttl: DEFAULT_TTL,
        }
    }
}

/// Searches several job boards and merges what they return.
pub struct JobAggregator {
    provider: Arc<dyn SearchProvider>,
    cache: SearchCache,
    clock: Arc<dyn Clock>,
    config: AggregatorConfig,
}

impl JobAggregator {
    pub fn new(provider: Arc<dyn SearchProvider>, config: AggregatorConfig) -> Self {
        Self::with_clock(provider, config, Arc::new(SystemClock))
    }

    /// Create an aggregator reading time from `clock`.
    pub fn with_clock(
        provider: Arc<dyn SearchProvider>,
        config: AggregatorConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        info!(
            "Job aggregator using {} over sources: {}",
            provider.name(),
            config
                .sources
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Self {
            cache: SearchCache::new(config.cache_ttl, clock.clone()),
            provider,
            clock,
            config,
        }
    }

    /// Search every enabled source and return the merged listing.
    ///
    /// Never fails; sources that error out contribute nothing.
    pub async fn search(&self, params: &JobSearchParams) -> Vec<ScrapedJob> {
        let fetches = self
            .config
            .sources
            .iter()
            .map(|source| self.search_source(*source, params));

        let per_source = join_all(fetches).await;
        let total: usize = per_source.iter().map(Vec::len).sum();

        let mut jobs = dedupe(per_source.into_iter().flatten().collect());
        sort_by_recency(&mut jobs);

        info!(
            "Aggregated {} jobs ({} before de-duplication)",
            jobs.len(),
            total
        );
        debug!("Cache holds {} entries", self.cache.len());
        jobs
    }

    /// Search a single source, consulting the cache first.
    pub async fn search_source(&self, source: JobSource, params: &JobSearchParams) -> Vec<ScrapedJob> {
        let key = cache_key(source, params);

        if let Some(jobs) = self.cache.get(&key) {
            debug!("Cache hit for {}", key);
            return jobs;
        }

        let Some(query) = source.build_query(params) else {
            debug!("{} is not searchable, skipping", source);
            return Vec::new();
        };

        let limit = params.limit.unwrap_or(self.config.default_limit);
        debug!("Searching {}: {}", source, query);

        match self.provider.search(&query, limit).await {
            Ok(results) => {
                let jobs = source.parse_results(&results, self.clock.now());
                self.cache.insert(key, jobs.clone());
                jobs
            }
            Err(e) => {
                warn!("Error searching {} jobs: {}", source, e);
                Vec::new()
            }
        }
    }

    /// Forget every cached result.
    #[allow(dead_code)] // The CLI runs a single search per process
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

/// Drop later postings whose title and company repeat an earlier one.
pub fn dedupe(jobs: Vec<ScrapedJob>) -> Vec<ScrapedJob> {
    let mut seen = HashSet::new();
    jobs.into_iter()
        .filter(|job| seen.insert(job.dedupe_key()))
        .collect()
}

/// Newest first. Ties keep their merge order.
pub fn sort_by_recency(jobs: &mut [ScrapedJob]) {
    jobs.sort_by(|a, b| b.posted_date.cmp(&a.posted_date));
}

/// Number of jobs per source.
pub fn count_by_source(jobs: &[ScrapedJob]) -> BTreeMap<JobSource, usize> {
    let mut counts = BTreeMap::new();
    for job in jobs {
        *counts.entry(job.source).or_default() += 1;
    }
    counts
}
