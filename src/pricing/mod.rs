//! Pricing engine module.
//!
//! Decides whether the active promotion reaches a service and stacks the
//! promotion and own add-on discounts into the final price. The catalog, the
//! booking summary and the quote endpoint all share these functions.

pub mod calculators;
pub mod requests;
pub mod responses;
pub mod routes;

// Re-export commonly used items
pub use calculators::{
    compute_discount_breakdown, compute_final_price, is_promotion_eligible, round_money,
    whole_percent, DiscountBreakdown, PricingError,
};
pub use routes::router;
