//! Request DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{AddOnChoice, Gender, Promotion, PromotionTarget, Service};

/// Request to quote a price from fully supplied inputs
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub service: QuoteServiceRequest,
    #[serde(default)]
    pub promotion: Option<QuotePromotionRequest>,
    #[serde(default)]
    pub add_on_choice: Option<AddOnChoice>,
}

/// Service fields the engine needs
#[derive(Debug, Deserialize)]
pub struct QuoteServiceRequest {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub original_price: Decimal,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub includes_add_on: bool,
    #[serde(default)]
    pub offers_add_on_discount: bool,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub add_on_discount_rate: Option<Decimal>,
}

/// Promotion fields the engine needs
#[derive(Debug, Deserialize)]
pub struct QuotePromotionRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_rate: Decimal,
    #[serde(default)]
    pub target: PromotionTarget,
}

impl From<QuoteServiceRequest> for Service {
    fn from(req: QuoteServiceRequest) -> Self {
        let mut service = Service::priced(req.id, req.name, req.original_price);
        service.gender = req.gender;
        service.includes_add_on = req.includes_add_on;
        service.offers_add_on_discount = req.offers_add_on_discount;
        service.add_on_discount_rate = req.add_on_discount_rate.unwrap_or(Decimal::ZERO);
        service
    }
}

impl From<QuotePromotionRequest> for Promotion {
    fn from(req: QuotePromotionRequest) -> Self {
        Promotion::new(
            req.name.unwrap_or_else(|| Promotion::DEFAULT_NAME.to_string()),
            req.discount_rate,
            req.target,
        )
    }
}
