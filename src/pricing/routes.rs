//! HTTP routes for stateless pricing quotes.

use axum::{routing::post, Json, Router};

use super::calculators::compute_discount_breakdown;
use super::requests::QuoteRequest;
use super::responses::QuoteResponse;
use crate::booking::BookingSelection;
use crate::error::Result;
use crate::models::{Promotion, Service};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/pricing/quote", post(quote))
}

/// Price a service from inputs supplied in full by the caller
async fn quote(Json(req): Json<QuoteRequest>) -> Result<Json<QuoteResponse>> {
    let service = Service::from(req.service);
    let promotion = req.promotion.map(Promotion::from);
    let selection = BookingSelection::with_choice(&service, req.add_on_choice)?;

    let breakdown = compute_discount_breakdown(&service, promotion.as_ref(), selection.choice())?;

    Ok(Json(QuoteResponse::new(&breakdown, selection.choice())))
}
