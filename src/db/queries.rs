//! Database queries for the service catalog and promotions.
//!
//! Rows are validated into typed records here; the pricing engine never sees
//! a raw row.

use sqlx::PgPool;
use tracing::warn;

use crate::error::{AppError, Result};
use crate::models::{Promotion, PromotionRow, Service, ServiceRow};

const SERVICES_VIEW_QUERY: &str = r#"
    SELECT
        id::bigint AS id,
        name,
        description,
        original_price::numeric AS original_price,
        percentage_discount::numeric AS percentage_discount,
        gender,
        includes_jumbo,
        discount_with_jumbo,
        duration::int4 AS duration,
        image_url
    FROM services_with_price
    WHERE active = true
    ORDER BY name ASC
"#;

const SERVICES_TABLE_QUERY: &str = r#"
    SELECT
        id::bigint AS id,
        name,
        description,
        original_price::numeric AS original_price,
        percentage_discount::numeric AS percentage_discount,
        gender,
        includes_jumbo,
        discount_with_jumbo,
        duration::int4 AS duration,
        image_url
    FROM services
    WHERE active IS NOT FALSE
    ORDER BY name ASC
"#;

/// Get all active services, ordered by name.
///
/// Reads the `services_with_price` view and falls back to the `services`
/// table when the view is unavailable. Rows that fail validation are skipped
/// so one bad record cannot empty the catalog.
pub async fn fetch_services(pool: &PgPool) -> Result<Vec<Service>> {
    let rows = match sqlx::query_as::<_, ServiceRow>(SERVICES_VIEW_QUERY)
        .fetch_all(pool)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            warn!("services_with_price unavailable, falling back to services: {}", e);
            sqlx::query_as::<_, ServiceRow>(SERVICES_TABLE_QUERY)
                .fetch_all(pool)
                .await?
        }
    };

    Ok(into_services(rows))
}

/// Get a single service by id
pub async fn fetch_service_by_id(pool: &PgPool, id: i64) -> Result<Service> {
    let row = sqlx::query_as::<_, ServiceRow>(
        r#"
        SELECT
            id::bigint AS id,
            name,
            description,
            original_price::numeric AS original_price,
            percentage_discount::numeric AS percentage_discount,
            gender,
            includes_jumbo,
            discount_with_jumbo,
            duration::int4 AS duration,
            image_url
        FROM services_with_price
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(Service::try_from(row)?)
}

/// Get the active promotion, if any.
///
/// Only the first active row counts. A malformed row is logged and treated
/// as no promotion.
pub async fn fetch_active_promotion(pool: &PgPool) -> Result<Option<Promotion>> {
    let row = sqlx::query_as::<_, PromotionRow>(
        r#"
        SELECT
            id::bigint AS id,
            name,
            percentage_discount::numeric AS percentage_discount,
            gender,
            is_active,
            header_bg_color,
            header_text_color
        FROM promotions
        WHERE is_active = true
        ORDER BY id ASC
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await?;

    Ok(row.and_then(into_promotion))
}

fn into_promotion(row: PromotionRow) -> Option<Promotion> {
    let id = row.id;
    match Promotion::try_from(row) {
        Ok(promotion) => Some(promotion),
        Err(e) => {
            warn!(promotion_id = id, "Ignoring promotion record: {}", e);
            None
        }
    }
}

fn into_services(rows: Vec<ServiceRow>) -> Vec<Service> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id;
            match Service::try_from(row) {
                Ok(service) => Some(service),
                Err(e) => {
                    warn!(service_id = id, "Skipping service record: {}", e);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(id: i64, price: Option<rust_decimal::Decimal>) -> ServiceRow {
        ServiceRow {
            id,
            name: Some(format!("Serviço {}", id)),
            description: None,
            original_price: price,
            percentage_discount: None,
            gender: None,
            includes_jumbo: None,
            discount_with_jumbo: None,
            duration: None,
            image_url: None,
        }
    }

    #[test]
    fn test_invalid_rows_are_skipped() {
        let services = into_services(vec![row(1, Some(dec!(50))), row(2, None), row(3, Some(dec!(80)))]);
        let ids: Vec<i64> = services.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    fn promotion_row(rate: Option<rust_decimal::Decimal>, gender: &str) -> PromotionRow {
        PromotionRow {
            id: 7,
            name: Some("Semana da Beleza".to_string()),
            percentage_discount: rate,
            gender: Some(gender.to_string()),
            is_active: Some(true),
            header_bg_color: None,
            header_text_color: None,
        }
    }

    #[test]
    fn test_malformed_promotion_counts_as_none() {
        assert_eq!(into_promotion(promotion_row(None, "feminino")), None);
        assert_eq!(into_promotion(promotion_row(Some(dec!(0.2)), "infantil")), None);

        let promotion = into_promotion(promotion_row(Some(dec!(0.2)), "ambos")).unwrap();
        assert_eq!(promotion.id, Some(7));
        assert_eq!(promotion.target, crate::models::PromotionTarget::Both);
    }
}
