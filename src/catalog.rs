//! Service catalog: cache-first loading, gender filter and priced entries

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::AppCache;
use crate::db::queries;
use crate::error::Result;
use crate::models::{AddOnPolicy, Gender, Promotion, Service};
use crate::pricing::{compute_discount_breakdown, is_promotion_eligible, round_money, whole_percent};

/// Catalog filter chosen on the services page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum CatalogFilter {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "feminino")]
    Feminine,
    #[serde(rename = "masculino")]
    Masculine,
    #[serde(rename = "unissex", alias = "ambos")]
    Unisex,
}

impl CatalogFilter {
    pub fn matches(&self, service: &Service) -> bool {
        match self {
            CatalogFilter::All => true,
            CatalogFilter::Feminine => service.gender == Gender::Feminine,
            CatalogFilter::Masculine => service.gender == Gender::Masculine,
            CatalogFilter::Unisex => service.gender == Gender::Unisex,
        }
    }
}

/// One priced service card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub image_url: Option<String>,
    pub gender: Gender,
    pub gender_label: &'static str,
    #[serde(with = "rust_decimal::serde::str")]
    pub original_price: Decimal,
    /// Price under the default add-on choice; `None` when the record could not be priced
    #[serde(with = "rust_decimal::serde::str_option")]
    pub final_price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub savings: Option<Decimal>,
    pub promotion_applies: bool,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub promotion_percent: Option<Decimal>,
    pub promotion_name: Option<String>,
    pub add_on_policy: AddOnPolicy,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub add_on_discount_percent: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CatalogEntry {
    /// Price one service. A pricing failure is kept on the entry instead of
    /// failing the whole catalog.
    pub fn build(service: &Service, promotion: Option<&Promotion>) -> Self {
        let policy = AddOnPolicy::for_service(service);
        let promotion_applies = is_promotion_eligible(service, promotion);

        let (final_price, savings, error) =
            match compute_discount_breakdown(service, promotion, policy.default_choice()) {
                Ok(breakdown) => (
                    Some(breakdown.final_price),
                    Some(round_money(breakdown.total_amount, 2)),
                    None,
                ),
                Err(e) => {
                    warn!(service_id = service.id, "Could not price service: {}", e);
                    (None, None, Some(e.to_string()))
                }
            };

        let applied_promotion = promotion.filter(|_| promotion_applies);

        Self {
            id: service.id,
            name: service.name.clone(),
            description: service.description.clone(),
            duration_minutes: service.duration_minutes,
            image_url: service.image_url.clone(),
            gender: service.gender,
            gender_label: service.gender.label(),
            original_price: service.original_price,
            final_price,
            savings,
            promotion_applies,
            promotion_percent: applied_promotion.map(|p| whole_percent(p.discount_rate)),
            promotion_name: applied_promotion.map(|p| p.name.clone()),
            add_on_policy: policy,
            add_on_discount_percent: service
                .offers_add_on_discount
                .then(|| whole_percent(service.add_on_discount_rate)),
            error,
        }
    }
}

/// Priced entries for the services that pass `filter`
pub fn build_catalog(
    services: &[Service],
    promotion: Option<&Promotion>,
    filter: CatalogFilter,
) -> Vec<CatalogEntry> {
    services
        .iter()
        .filter(|s| filter.matches(s))
        .map(|s| CatalogEntry::build(s, promotion))
        .collect()
}

/// Load the catalog, cache first
pub async fn load_services(pool: &PgPool, cache: &AppCache) -> Result<Arc<Vec<Service>>> {
    if let Some(cached) = cache.services.get(AppCache::SERVICES_KEY).await {
        debug!("Cache HIT for services");
        return Ok(cached);
    }

    debug!("Cache MISS for services");
    let services = Arc::new(queries::fetch_services(pool).await?);
    cache
        .services
        .insert(AppCache::SERVICES_KEY.to_string(), services.clone())
        .await;
    Ok(services)
}

/// Load one service, looking in the cached catalog before the database
pub async fn load_service(pool: &PgPool, cache: &AppCache, id: i64) -> Result<Service> {
    if let Some(cached) = cache.services.get(AppCache::SERVICES_KEY).await {
        if let Some(service) = cached.iter().find(|s| s.id == id) {
            debug!("Cache HIT for service {}", id);
            return Ok(service.clone());
        }
    }

    debug!("Cache MISS for service {}", id);
    queries::fetch_service_by_id(pool, id).await
}

/// Load the active promotion, cache first
pub async fn load_active_promotion(pool: &PgPool, cache: &AppCache) -> Result<Option<Promotion>> {
    if let Some(cached) = cache.promotion.get(AppCache::PROMOTION_KEY).await {
        debug!("Cache HIT for active promotion");
        return Ok((*cached).clone());
    }

    debug!("Cache MISS for active promotion");
    let promotion = queries::fetch_active_promotion(pool).await?;
    cache.put_promotion(promotion.clone()).await;
    Ok(promotion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PromotionTarget;
    use rust_decimal_macros::dec;

    fn services() -> Vec<Service> {
        let mut braids = Service::priced(1, "Box braids", dec!(200));
        braids.gender = Gender::Feminine;
        braids.offers_add_on_discount = true;
        braids.add_on_discount_rate = dec!(0.10);

        let mut beard = Service::priced(2, "Barba", dec!(35));
        beard.gender = Gender::Masculine;

        let cut = Service::priced(3, "Corte", dec!(50));

        vec![braids, beard, cut]
    }

    #[test]
    fn test_filter_selects_by_gender() {
        let services = services();
        let ids = |filter| {
            build_catalog(&services, None, filter)
                .iter()
                .map(|e| e.id)
                .collect::<Vec<_>>()
        };

        assert_eq!(ids(CatalogFilter::All), vec![1, 2, 3]);
        assert_eq!(ids(CatalogFilter::Feminine), vec![1]);
        assert_eq!(ids(CatalogFilter::Masculine), vec![2]);
        assert_eq!(ids(CatalogFilter::Unisex), vec![3]);
    }

    #[test]
    fn test_ambos_filter_means_unisex_services() {
        let filter: CatalogFilter = serde_json::from_str("\"ambos\"").unwrap();
        assert_eq!(filter, CatalogFilter::Unisex);
    }

    #[test]
    fn test_entries_use_default_add_on_choice() {
        let promo = Promotion::new("Outubro Rosa", dec!(0.25), PromotionTarget::Feminine);
        let catalog = build_catalog(&services(), Some(&promo), CatalogFilter::All);

        // Customer-only add-on: 200 - 50 = 150, then 10% = 135
        let braids = &catalog[0];
        assert!(braids.promotion_applies);
        assert_eq!(braids.final_price, Some(dec!(135.00)));
        assert_eq!(braids.savings, Some(dec!(65.00)));
        assert_eq!(braids.promotion_percent, Some(dec!(25)));
        assert_eq!(braids.add_on_discount_percent, Some(dec!(10)));

        let beard = &catalog[1];
        assert!(!beard.promotion_applies);
        assert_eq!(beard.final_price, Some(dec!(35)));
        assert_eq!(beard.promotion_name, None);
    }

    #[test]
    fn test_bad_record_does_not_break_catalog() {
        let mut services = services();
        services[1].original_price = dec!(-10);

        let catalog = build_catalog(&services, None, CatalogFilter::All);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog[1].final_price, None);
        assert!(catalog[1].error.is_some());
        assert_eq!(catalog[2].final_price, Some(dec!(50)));
    }
}
