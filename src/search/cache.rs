//! Short-lived cache of per-source search results.
//!
//! Entries are keyed by source and serialized parameters and expire after
//! a fixed time-to-live. Time is read through [`Clock`] so that expiry can
//! be driven from tests.

use crate::models::{JobSearchParams, JobSource, ScrapedJob};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

/// Default time-to-live of a cache entry.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Cache key for one source and one set of parameters.
pub fn cache_key(source: JobSource, params: &JobSearchParams) -> String {
    format!("{}_{}", source.prefix(), params.to_json())
}

struct CacheEntry {
    jobs: Vec<ScrapedJob>,
    stored_at: DateTime<Utc>,
}

/// In-memory result cache with time-based expiry.
pub struct SearchCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl SearchCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Return the cached jobs for `key` if the entry is still live.
    ///
    /// An expired entry is dropped on the way out.
    pub fn get(&self, key: &str) -> Option<Vec<ScrapedJob>> {
        let now = self.clock.now();
        let mut entries = self.lock();

        let live = entries.get(key).map(|entry| self.is_live(entry, now))?;
        if live {
            entries.get(key).map(|entry| entry.jobs.clone())
        } else {
            debug!("Cache entry expired: {}", key);
            entries.remove(key);
            None
        }
    }

    /// Store `jobs` under `key`, dropping every entry that has expired.
    pub fn insert(&self, key: String, jobs: Vec<ScrapedJob>) {
        let stored_at = self.clock.now();
        let mut entries = self.lock();

        let before = entries.len();
        entries.retain(|_, entry| self.is_live(entry, stored_at));
        if entries.len() != before {
            debug!("Evicted {} expired cache entries", before - entries.len());
        }

        entries.insert(key, CacheEntry { jobs, stored_at });
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[allow(dead_code)] // Pairs with len()
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_live(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        // A negative age (clock moved backwards) counts as fresh.
        (now - entry.stored_at)
            .to_std()
            .map(|age| age < self.ttl)
            .unwrap_or(true)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Clock that only moves when told to.
#[cfg(test)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::from_std(by).unwrap();
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap(),
        ))
    }

    #[test]
    fn test_cache_key_includes_source_and_params() {
        let params = JobSearchParams {
            query: Some("go".to_string()),
            ..Default::default()
        };
        assert_eq!(
            cache_key(JobSource::LinkedIn, &params),
            r#"linkedin_{"query":"go"}"#
        );
        assert_eq!(cache_key(JobSource::RemoteCo, &params), r#"remote_{"query":"go"}"#);
    }

    #[test]
    fn test_hit_within_ttl() {
        let clock = clock();
        let cache = SearchCache::new(DEFAULT_TTL, clock.clone());
        cache.insert("k".to_string(), Vec::new());

        clock.advance(Duration::from_secs(299));
        assert_eq!(cache.get("k"), Some(Vec::new()));
    }

    #[test]
    fn test_expired_entry_is_evicted() {
        let clock = clock();
        let cache = SearchCache::new(DEFAULT_TTL, clock.clone());
        cache.insert("k".to_string(), Vec::new());

        clock.advance(DEFAULT_TTL);
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_evicts_stale_entries_for_other_keys() {
        let clock = clock();
        let cache = SearchCache::new(DEFAULT_TTL, clock.clone());
        cache.insert("old".to_string(), Vec::new());

        clock.advance(Duration::from_secs(60));
        cache.insert("recent".to_string(), Vec::new());

        clock.advance(Duration::from_secs(250));
        cache.insert("new".to_string(), Vec::new());

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("old"), None);
        assert_eq!(cache.get("recent"), Some(Vec::new()));
    }

    #[test]
    fn test_missing_key_and_clear() {
        let cache = SearchCache::new(DEFAULT_TTL, clock());
        assert_eq!(cache.get("absent"), None);

        cache.insert("a".to_string(), Vec::new());
        cache.insert("b".to_string(), Vec::new());
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert_eq!(cache.len(), 0);
    }
}
