//! Booking route handlers

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::booking::{
    compose_order_message, qr_data_uri, whatsapp_link, BookingForm, BookingSelection, PriceSummary,
};
use crate::catalog;
use crate::error::Result;
use crate::models::AddOnChoice;
use crate::AppState;

/// Request to refresh the booking price summary
#[derive(Debug, Deserialize)]
pub struct BookingQuoteRequest {
    pub service_id: i64,
    #[serde(default)]
    pub add_on_choice: Option<AddOnChoice>,
}

/// Request to submit a booking
#[derive(Debug, Deserialize)]
pub struct SubmitBookingRequest {
    pub service_id: i64,
    #[serde(default)]
    pub add_on_choice: Option<AddOnChoice>,
    pub form: BookingForm,
}

#[derive(Debug, Serialize)]
pub struct SubmitBookingResponse {
    pub reference: Uuid,
    pub submitted_at: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::str")]
    pub final_price: Decimal,
    pub summary: PriceSummary,
    pub message: String,
    pub whatsapp_url: String,
    /// PNG data URI of `whatsapp_url`; `None` when the link does not fit in a QR code
    pub qr_code: Option<String>,
}

/// Price summary for the current add-on choice
pub async fn quote(
    State(state): State<AppState>,
    Json(req): Json<BookingQuoteRequest>,
) -> Result<Json<PriceSummary>> {
    let summary = price_summary(&state, req.service_id, req.add_on_choice).await?;
    Ok(Json(summary))
}

/// Validate the form and prepare the WhatsApp hand-off
pub async fn submit(
    State(state): State<AppState>,
    Json(req): Json<SubmitBookingRequest>,
) -> Result<Json<SubmitBookingResponse>> {
    let summary = price_summary(&state, req.service_id, req.add_on_choice).await?;
    let form = req.form.validate()?;

    let message = compose_order_message(&state.config.business_name, &summary, &form);
    let whatsapp_url = whatsapp_link(&state.config.whatsapp_number, &message);
    let qr_code = match qr_data_uri(&whatsapp_url) {
        Ok(uri) => Some(uri),
        Err(e) => {
            warn!(link_len = whatsapp_url.len(), "Skipping QR code: {}", e);
            None
        }
    };

    let reference = Uuid::new_v4();
    info!(
        %reference,
        service_id = summary.service_id,
        final_price = %summary.final_price,
        "Booking hand-off prepared"
    );

    Ok(Json(SubmitBookingResponse {
        reference,
        submitted_at: Utc::now(),
        final_price: summary.final_price,
        summary,
        message,
        whatsapp_url,
        qr_code,
    }))
}

async fn price_summary(
    state: &AppState,
    service_id: i64,
    choice: Option<AddOnChoice>,
) -> Result<PriceSummary> {
    let service = catalog::load_service(&state.db, &state.cache, service_id).await?;
    let promotion = catalog::load_active_promotion(&state.db, &state.cache).await?;
    let selection = BookingSelection::with_choice(&service, choice)?;

    Ok(PriceSummary::build(&service, promotion.as_ref(), &selection)?)
}
