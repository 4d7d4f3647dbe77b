//! View revalidation
//!
//! Rendered views are cached per logical path. A mutation marks the path
//! stale; the next read recomputes it.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Path of the invoices listing view
pub const INVOICES_PATH: &str = "/dashboard/invoices";

/// Marks cached views stale
///
/// Invalidation is side-effect only and idempotent; callers never see it
/// fail.
pub trait CacheInvalidator: Send + Sync {
    fn revalidate_path(&self, path: &str);
}

/// Invalidator that caches nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInvalidator;

impl CacheInvalidator for NoopInvalidator {
    fn revalidate_path(&self, path: &str) {
        tracing::trace!(path, "revalidate (noop)");
    }
}

#[derive(Debug, Clone, Default)]
struct CachedView {
    body: Option<Value>,
    generation: u64,
}

/// In-process render cache keyed by view path
///
/// Each path carries a revalidation generation that only moves forward, so
/// tests and callers can observe that an invalidation happened even when
/// nothing was cached yet.
#[derive(Clone, Default)]
pub struct ViewCache {
    views: Arc<RwLock<HashMap<String, CachedView>>>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    // Poisoning is recovered: every entry is replaceable.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, CachedView>> {
        self.views.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CachedView>> {
        self.views.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cached body for `path`, if one is fresh
    pub fn get(&self, path: &str) -> Option<Value> {
        let views = self.read();
        views.get(path).and_then(|v| v.body.clone())
    }

    /// Store a freshly rendered body for `path`
    pub fn put(&self, path: &str, body: Value) {
        let mut views = self.write();
        views.entry(path.to_string()).or_default().body = Some(body);
    }

    /// Number of times `path` has been revalidated
    pub fn generation(&self, path: &str) -> u64 {
        let views = self.read();
        views.get(path).map(|v| v.generation).unwrap_or(0)
    }

    /// Return the cached body or render, cache and return a new one
    pub async fn get_or_render<F, Fut, E>(&self, path: &str, render: F) -> Result<Value, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<Value, E>>,
    {
        if let Some(body) = self.get(path) {
            tracing::trace!(path, "view cache hit");
            return Ok(body);
        }

        let generation = self.generation(path);
        let body = render().await?;

        // A revalidation that raced the render wins; the stale body is not stored.
        let mut views = self.write();
        let entry = views.entry(path.to_string()).or_default();
        if entry.generation == generation {
            entry.body = Some(body.clone());
        }
        Ok(body)
    }
}

impl CacheInvalidator for ViewCache {
    fn revalidate_path(&self, path: &str) {
        let mut views = self.write();
        let entry = views.entry(path.to_string()).or_default();
        entry.body = None;
        entry.generation += 1;
        tracing::debug!(path, generation = entry.generation, "view revalidated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::convert::Infallible;

    #[test]
    fn test_revalidate_clears_body_and_bumps_generation() {
        let cache = ViewCache::new();
        cache.put(INVOICES_PATH, json!([1, 2]));
        assert_eq!(cache.get(INVOICES_PATH), Some(json!([1, 2])));

        cache.revalidate_path(INVOICES_PATH);
        assert_eq!(cache.get(INVOICES_PATH), None);
        assert_eq!(cache.generation(INVOICES_PATH), 1);
    }

    #[test]
    fn test_revalidate_is_idempotent_and_per_path() {
        let cache = ViewCache::new();
        cache.put("/dashboard", json!("home"));
        cache.revalidate_path(INVOICES_PATH);
        cache.revalidate_path(INVOICES_PATH);

        assert_eq!(cache.generation(INVOICES_PATH), 2);
        assert_eq!(cache.get(INVOICES_PATH), None);
        assert_eq!(cache.get("/dashboard"), Some(json!("home")));
    }

    #[tokio::test]
    async fn test_get_or_render_caches_until_revalidated() {
        let cache = ViewCache::new();

        let first: Result<Value, Infallible> =
            cache.get_or_render(INVOICES_PATH, || async { Ok(json!(1)) }).await;
        let second: Result<Value, Infallible> =
            cache.get_or_render(INVOICES_PATH, || async { Ok(json!(2)) }).await;
        assert_eq!(first.unwrap(), json!(1));
        assert_eq!(second.unwrap(), json!(1));

        cache.revalidate_path(INVOICES_PATH);
        let third: Result<Value, Infallible> =
            cache.get_or_render(INVOICES_PATH, || async { Ok(json!(3)) }).await;
        assert_eq!(third.unwrap(), json!(3));
    }

    #[tokio::test]
    async fn test_render_error_is_not_cached() {
        let cache = ViewCache::new();
        let failed: Result<Value, &str> = cache
            .get_or_render(INVOICES_PATH, || async { Err("store down") })
            .await;
        assert!(failed.is_err());
        assert_eq!(cache.get(INVOICES_PATH), None);
    }

    #[test]
    fn test_noop_invalidator() {
        NoopInvalidator.revalidate_path(INVOICES_PATH);
    }
}
