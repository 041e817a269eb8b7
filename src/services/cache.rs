use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::{MatchQuery, MatchResult};
use crate::models::Role;

/// In-process cache of resolved match results
///
/// Keys carry the snapshot generation, so a result computed against an old
/// snapshot is never returned after a reload.
pub struct CacheManager {
    l1_cache: Option<moka::future::Cache<CacheKey, MatchResult>>,
}

impl CacheManager {
    /// Create a new cache manager
    pub fn new(l1_size: u64, ttl_secs: u64) -> Self {
        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            l1_cache: Some(l1_cache),
        }
    }

    /// A cache that stores nothing
    pub fn disabled() -> Self {
        Self { l1_cache: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.l1_cache.is_some()
    }

    pub async fn get(&self, key: &CacheKey) -> Option<MatchResult> {
        let cache = self.l1_cache.as_ref()?;
        let hit = cache.get(key).await;
        if hit.is_some() {
            tracing::trace!("L1 cache hit: {:?}", key);
        } else {
            tracing::trace!("Cache miss: {:?}", key);
        }
        hit
    }

    pub async fn set(&self, key: CacheKey, value: MatchResult) {
        if let Some(cache) = &self.l1_cache {
            tracing::trace!("Cache set: {:?}", key);
            cache.insert(key, value).await;
        }
    }

    /// Drop every cached result
    pub fn invalidate_all(&self) {
        if let Some(cache) = &self.l1_cache {
            cache.invalidate_all();
            tracing::debug!("Invalidated all cached match results");
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            enabled: self.is_enabled(),
            l1_size: self.l1_cache.as_ref().map_or(0, |cache| cache.entry_count()),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub enabled: bool,
    pub l1_size: u64,
}

/// Key for one resolved match result
///
/// Each part is a separate field, so free text in a company name or keyword
/// can never make two different queries share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    generation: u64,
    role: Role,
    company_name: String,
    keyword: String,
    max_distance_bits: u64,
}

impl CacheKey {
    /// Build a cache key for match results
    ///
    /// The keyword is trimmed and lower-cased the same way the matcher
    /// normalizes it; the bound is keyed by its exact bit pattern.
    pub fn matches(generation: u64, query: &MatchQuery, max_distance_miles: f64) -> Self {
        let keyword = query
            .keyword
            .as_deref()
            .map(|k| k.trim().to_lowercase())
            .unwrap_or_default();

        Self {
            generation,
            role: query.role,
            company_name: query.company_name.clone(),
            keyword,
            max_distance_bits: max_distance_miles.to_bits(),
        }
    }
}
