//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::{round_money, DiscountBreakdown};
use crate::models::AddOnChoice;

/// Discount breakdown rounded for display
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub original_price: Decimal,
    pub promotion_applied: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub promotion_amount: Decimal,
    pub add_on_applied: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub add_on_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_percent: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub final_price: Decimal,
    pub add_on_choice: AddOnChoice,
}

impl QuoteResponse {
    pub fn new(breakdown: &DiscountBreakdown, add_on_choice: AddOnChoice) -> Self {
        Self {
            original_price: round_money(breakdown.original_price, 2),
            promotion_applied: breakdown.promotion_applied,
            promotion_amount: round_money(breakdown.promotion_amount, 2),
            add_on_applied: breakdown.add_on_applied,
            add_on_amount: round_money(breakdown.add_on_amount, 2),
            total_amount: round_money(breakdown.total_amount, 2),
            total_percent: round_money(breakdown.total_percent, 1),
            final_price: breakdown.final_price,
            add_on_choice,
        }
    }
}

/// Generic error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
