use crate::models::{CatalogQuery, Property};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// In-process snapshot cache for property catalog fetches
///
/// Only raw backend listings are cached. Scores depend on per-request
/// criteria and behavior and are always recomputed.
pub struct CatalogCache {
    cache: moka::future::Cache<String, Arc<Vec<Property>>>,
    ttl_secs: u64,
}

impl CatalogCache {
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache, ttl_secs }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Return the cached snapshot for `query`, or run `fetch` and store its result
    ///
    /// Concurrent misses for the same key share a single `fetch`. Fetch
    /// errors are returned to every waiting caller and never cached.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        query: &CatalogQuery,
        fetch: F,
    ) -> Result<Arc<Vec<Property>>, Arc<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Property>, E>>,
        E: Send + Sync + 'static,
    {
        let key = CatalogKey::properties(query);

        self.cache
            .try_get_with(key.clone(), async {
                tracing::trace!("Catalog cache miss: {}", key);
                fetch().await.map(Arc::new)
            })
            .await
    }

    /// Drop every cached snapshot
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
        tracing::debug!("Invalidated catalog cache");
    }
}

/// Cache key builder
pub struct CatalogKey;

impl CatalogKey {
    /// Build a cache key for a catalog listing
    pub fn properties(query: &CatalogQuery) -> String {
        format!(
            "properties:{}:{}:{}",
            query.city.as_deref().unwrap_or("*").to_lowercase(),
            query.property_type.as_deref().unwrap_or("*").to_lowercase(),
            query.limit.map(|l| l.to_string()).unwrap_or_else(|| "*".to_string())
        )
    }
}
