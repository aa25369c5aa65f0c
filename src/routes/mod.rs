//! HTTP route handlers

pub mod booking;
pub mod catalog;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/cache/invalidate", post(health::invalidate_cache))
        .route("/api/services", get(catalog::list))
        .route("/api/services/:id", get(catalog::detail))
        .route("/api/promotion", get(catalog::active_promotion))
        .route("/api/booking/quote", post(booking::quote))
        .route("/api/booking/submit", post(booking::submit))
        .merge(crate::pricing::router())
}
