//! In-memory caching using moka
//!
//! Provides application-level caching for the service catalog and the active
//! promotion. The promotion is re-read every few minutes so a campaign can be
//! switched on or off without a restart.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::db::queries;
use crate::models::{Promotion, Service};

/// Default lifetime of the cached active promotion
pub const DEFAULT_PROMOTION_TTL: Duration = Duration::from_secs(5 * 60);

/// Application cache holding the catalog and the active promotion
#[derive(Clone)]
pub struct AppCache {
    /// Active services ordered by name (single entry under `SERVICES_KEY`)
    pub services: Cache<String, Arc<Vec<Service>>>,
    /// Active promotion, `None` cached as well (single entry under `PROMOTION_KEY`)
    pub promotion: Cache<String, Arc<Option<Promotion>>>,
}

impl AppCache {
    pub const SERVICES_KEY: &'static str = "services:all";
    pub const PROMOTION_KEY: &'static str = "promotion:active";

    /// Create a new cache instance with configured TTLs
    pub fn new(promotion_ttl: Duration) -> Self {
        Self {
            // Catalog: 1 entry, 10 min TTL
            services: Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(10 * 60))
                .build(),

            // Active promotion: 1 entry, short TTL
            promotion: Cache::builder()
                .max_capacity(1)
                .time_to_live(promotion_ttl)
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            services_cached: self.services.entry_count() > 0,
            promotion_cached: self.promotion.entry_count() > 0,
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.services.invalidate_all();
        self.promotion.invalidate_all();
        info!("All caches invalidated");
    }

    /// Seed the catalog
    pub async fn put_services(&self, services: Vec<Service>) {
        self.services
            .insert(Self::SERVICES_KEY.to_string(), Arc::new(services))
            .await;
    }

    /// Seed the active promotion
    pub async fn put_promotion(&self, promotion: Option<Promotion>) {
        self.promotion
            .insert(Self::PROMOTION_KEY.to_string(), Arc::new(promotion))
            .await;
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new(DEFAULT_PROMOTION_TTL)
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub services_cached: bool,
    pub promotion_cached: bool,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes every `refresh`, normally the
/// promotion TTL.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool, refresh: Duration) {
    let mut ticks = refresh_ticks(refresh);
    loop {
        // First tick completes immediately
        ticks.tick().await;
        warm_cache(&cache, &db).await;
    }
}

fn refresh_ticks(refresh: Duration) -> Interval {
    let mut ticks = interval(refresh);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticks
}

/// Warm the cache with the catalog and the active promotion
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    info!("Starting cache warm-up...");

    match queries::fetch_services(db).await {
        Ok(services) => cache.put_services(services).await,
        Err(e) => warn!("Failed to warm services cache: {}", e),
    }

    match queries::fetch_active_promotion(db).await {
        Ok(promotion) => cache.put_promotion(promotion).await,
        Err(e) => warn!("Failed to warm promotion cache: {}", e),
    }

    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_seeded_entries_are_readable() {
        let cache = AppCache::default();
        cache
            .put_services(vec![Service::priced(1, "Corte", dec!(40))])
            .await;
        cache.put_promotion(None).await;

        let services = cache.services.get(AppCache::SERVICES_KEY).await.unwrap();
        assert_eq!(services.len(), 1);
        let promotion = cache.promotion.get(AppCache::PROMOTION_KEY).await.unwrap();
        assert!(promotion.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_warmer_follows_configured_refresh() {
        let refresh = Duration::from_secs(42);
        let mut ticks = refresh_ticks(refresh);
        let start = tokio::time::Instant::now();

        ticks.tick().await;
        assert_eq!(start.elapsed(), Duration::ZERO);

        ticks.tick().await;
        assert_eq!(start.elapsed(), refresh);
    }

    #[tokio::test]
    async fn test_invalidate_all_clears_entries() {
        let cache = AppCache::default();
        cache.put_promotion(None).await;
        cache.invalidate_all();
        assert!(cache.promotion.get(AppCache::PROMOTION_KEY).await.is_none());
    }
}
