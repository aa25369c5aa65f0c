//! Live price summary shown beside the booking form

use rust_decimal::Decimal;
use serde::Serialize;

use super::selection::BookingSelection;
use crate::models::{AddOnChoice, AddOnPolicy, Promotion, Service};
use crate::pricing::{compute_discount_breakdown, round_money, whole_percent, PricingError};

/// Promotion line of the summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromotionLine {
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub percent: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

/// Own add-on discount line of the summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddOnLine {
    #[serde(with = "rust_decimal::serde::str")]
    pub percent: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSummary {
    pub service_id: i64,
    pub service_name: String,
    pub add_on_policy: AddOnPolicy,
    pub add_on_choice: AddOnChoice,
    #[serde(with = "rust_decimal::serde::str")]
    pub original_price: Decimal,
    pub promotion: Option<PromotionLine>,
    pub add_on_discount: Option<AddOnLine>,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_savings: Decimal,
    /// Savings as a percentage of the original price, one decimal
    #[serde(with = "rust_decimal::serde::str")]
    pub savings_percent: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub final_price: Decimal,
}

impl PriceSummary {
    /// Recompute the summary for the current selection
    pub fn build(
        service: &Service,
        promotion: Option<&Promotion>,
        selection: &BookingSelection,
    ) -> Result<Self, PricingError> {
        let breakdown = compute_discount_breakdown(service, promotion, selection.choice())?;

        let promotion_line = promotion
            .filter(|_| breakdown.promotion_applied)
            .map(|p| PromotionLine {
                name: p.name.clone(),
                percent: whole_percent(p.discount_rate),
                amount: round_money(breakdown.promotion_amount, 2),
            });

        let add_on_line = breakdown.add_on_applied.then(|| AddOnLine {
            percent: whole_percent(service.add_on_discount_rate),
            amount: round_money(breakdown.add_on_amount, 2),
        });

        Ok(Self {
            service_id: service.id,
            service_name: service.name.clone(),
            add_on_policy: selection.policy(),
            add_on_choice: selection.choice(),
            original_price: round_money(breakdown.original_price, 2),
            promotion: promotion_line,
            add_on_discount: add_on_line,
            total_savings: round_money(breakdown.total_amount, 2),
            savings_percent: round_money(breakdown.total_percent, 1),
            final_price: breakdown.final_price,
        })
    }

    pub fn has_discount(&self) -> bool {
        self.total_savings > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, PromotionTarget};
    use rust_decimal_macros::dec;

    fn service() -> Service {
        let mut service = Service::priced(4, "Tranças nagô", dec!(150));
        service.gender = Gender::Feminine;
        service.includes_add_on = true;
        service.offers_add_on_discount = true;
        service.add_on_discount_rate = dec!(0.15);
        service
    }

    #[test]
    fn test_summary_follows_selection_changes() {
        let service = service();
        let promo = Promotion::new("Outubro Rosa", dec!(0.10), PromotionTarget::Feminine);
        let mut selection = BookingSelection::for_service(&service);

        let summary = PriceSummary::build(&service, Some(&promo), &selection).unwrap();
        assert_eq!(summary.final_price, dec!(135.00));
        assert!(summary.add_on_discount.is_none());
        assert_eq!(
            summary.promotion,
            Some(PromotionLine {
                name: "Outubro Rosa".to_string(),
                percent: dec!(10),
                amount: dec!(15.00),
            })
        );

        selection.choose(AddOnChoice::CustomerProvided).unwrap();
        let summary = PriceSummary::build(&service, Some(&promo), &selection).unwrap();
        // 150 - 15 = 135, then 15% of 135 = 20.25
        assert_eq!(summary.add_on_discount.as_ref().map(|l| l.amount), Some(dec!(20.25)));
        assert_eq!(summary.final_price, dec!(114.75));
        assert_eq!(summary.total_savings, dec!(35.25));
        assert_eq!(summary.savings_percent, dec!(23.5));
        assert!(summary.has_discount());
    }

    #[test]
    fn test_ineligible_promotion_has_no_line() {
        let service = service();
        let promo = Promotion::new("Barba Feita", dec!(0.30), PromotionTarget::Masculine);
        let selection = BookingSelection::for_service(&service);

        let summary = PriceSummary::build(&service, Some(&promo), &selection).unwrap();
        assert!(summary.promotion.is_none());
        assert!(!summary.has_discount());
        assert_eq!(summary.final_price, dec!(150));
    }
}
