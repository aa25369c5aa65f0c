//! Catalog route handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::{self, build_catalog, CatalogEntry, CatalogFilter};
use crate::error::Result;
use crate::models::Promotion;
use crate::AppState;

/// Query parameters for the services listing
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub gender: CatalogFilter,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub promotion: Option<Promotion>,
    pub services: Vec<CatalogEntry>,
}

/// Services listing with prices
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<CatalogResponse>> {
    let services = catalog::load_services(&state.db, &state.cache).await?;
    let promotion = catalog::load_active_promotion(&state.db, &state.cache).await?;

    let entries = build_catalog(&services, promotion.as_ref(), query.gender);

    Ok(Json(CatalogResponse {
        promotion,
        services: entries,
    }))
}

/// Single priced service
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CatalogEntry>> {
    let service = catalog::load_service(&state.db, &state.cache, id).await?;
    let promotion = catalog::load_active_promotion(&state.db, &state.cache).await?;

    Ok(Json(CatalogEntry::build(&service, promotion.as_ref())))
}

/// Active promotion, or `null`
pub async fn active_promotion(State(state): State<AppState>) -> Result<Json<Option<Promotion>>> {
    let promotion = catalog::load_active_promotion(&state.db, &state.cache).await?;
    Ok(Json(promotion))
}
