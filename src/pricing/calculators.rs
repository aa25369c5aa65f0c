//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no database access, no shared state.
//! Every page that shows a price goes through these, so the catalog, the
//! booking summary and the WhatsApp message can never disagree.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{AddOnChoice, AddOnPolicy, Gender, Promotion, PromotionTarget, Service};

/// Pricing calculation error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("Invalid service input: {0}")]
    InvalidServiceInput(String),

    #[error("Invalid rate for {field}: {value} is outside [0, 1]")]
    InvalidRateInput { field: &'static str, value: Decimal },
}

/// Round to specified decimal places, halves rounding up (away from zero).
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use girosa_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(3));
/// assert_eq!(round_money(dec!(0.125), 2), dec!(0.13));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// A rate as a whole percentage, e.g. `0.15` -> `15`
pub fn whole_percent(rate: Decimal) -> Decimal {
    round_money(rate * Decimal::ONE_HUNDRED, 0)
}

/// Whether `promotion` reaches `service`.
///
/// `ambos` reaches everything; otherwise the promotion target and the
/// service gender must match exactly, `unissex` included.
pub fn is_promotion_eligible(service: &Service, promotion: Option<&Promotion>) -> bool {
    let Some(promotion) = promotion else {
        return false;
    };

    matches!(
        (promotion.target, service.gender),
        (PromotionTarget::Both, _)
            | (PromotionTarget::Feminine, Gender::Feminine)
            | (PromotionTarget::Masculine, Gender::Masculine)
            | (PromotionTarget::Unisex, Gender::Unisex)
    )
}

/// Amounts taken off at each stage, promotion first, then the add-on discount.
///
/// Amounts are kept at full precision; only `final_price` is rounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscountBreakdown {
    pub original_price: Decimal,
    pub promotion_applied: bool,
    pub promotion_amount: Decimal,
    pub add_on_applied: bool,
    pub add_on_amount: Decimal,
    pub total_amount: Decimal,
    /// `total_amount` as a percentage of `original_price`
    pub total_percent: Decimal,
    pub final_price: Decimal,
}

/// Final payable price for a service.
///
/// # Errors
/// [`PricingError::InvalidServiceInput`] for a negative price,
/// [`PricingError::InvalidRateInput`] for any rate outside `[0, 1]`.
pub fn compute_final_price(
    service: &Service,
    promotion: Option<&Promotion>,
    choice: AddOnChoice,
) -> Result<Decimal, PricingError> {
    compute_discount_breakdown(service, promotion, choice).map(|b| b.final_price)
}

/// Staged discount breakdown for a service.
///
/// The promotion rate applies to the original price; the add-on rate applies
/// to what is left after the promotion.
pub fn compute_discount_breakdown(
    service: &Service,
    promotion: Option<&Promotion>,
    choice: AddOnChoice,
) -> Result<DiscountBreakdown, PricingError> {
    validate_inputs(service, promotion)?;

    let original_price = service.original_price;
    let mut price = original_price;

    let promotion_rate = promotion
        .filter(|p| is_promotion_eligible(service, Some(p)))
        .map(|p| p.discount_rate)
        .unwrap_or(Decimal::ZERO);

    let promotion_applied = promotion_rate > Decimal::ZERO;
    let promotion_amount = if promotion_applied {
        price * promotion_rate
    } else {
        Decimal::ZERO
    };
    price -= promotion_amount;

    let add_on_applied = add_on_discount_applies(service, choice);
    let add_on_amount = if add_on_applied {
        price * service.add_on_discount_rate
    } else {
        Decimal::ZERO
    };
    price -= add_on_amount;

    let total_amount = promotion_amount + add_on_amount;
    let total_percent = if original_price > Decimal::ZERO {
        total_amount / original_price * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    Ok(DiscountBreakdown {
        original_price,
        promotion_applied,
        promotion_amount,
        add_on_applied,
        add_on_amount,
        total_amount,
        total_percent,
        final_price: round_money(price, 2),
    })
}

fn add_on_discount_applies(service: &Service, choice: AddOnChoice) -> bool {
    if AddOnPolicy::for_service(service) == AddOnPolicy::NotApplicable {
        return false;
    }

    choice == AddOnChoice::CustomerProvided
        && service.offers_add_on_discount
        && service.add_on_discount_rate > Decimal::ZERO
}

fn validate_inputs(service: &Service, promotion: Option<&Promotion>) -> Result<(), PricingError> {
    if service.original_price < Decimal::ZERO {
        return Err(PricingError::InvalidServiceInput(format!(
            "service {} has a negative price ({})",
            service.id, service.original_price
        )));
    }

    if service.offers_add_on_discount {
        check_rate("add_on_discount_rate", service.add_on_discount_rate)?;
    }

    if let Some(promotion) = promotion {
        check_rate("discount_rate", promotion.discount_rate)?;
    }

    Ok(())
}

fn check_rate(field: &'static str, value: Decimal) -> Result<(), PricingError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(PricingError::InvalidRateInput { field, value });
    }
    Ok(())
}
