//! Domain models for services, promotions and add-on options

mod add_on;
mod promotion;
mod service;

pub use add_on::{AddOnChoice, AddOnPolicy};
pub use promotion::{Promotion, PromotionRow, PromotionTarget};
pub use service::{Gender, Service, ServiceRow};

/// A backend row that could not be turned into a typed record
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("{record} {id} is missing '{field}'")]
    MissingField {
        record: &'static str,
        id: i64,
        field: &'static str,
    },

    #[error("{record} {id} has an invalid '{field}': {reason}")]
    InvalidValue {
        record: &'static str,
        id: i64,
        field: &'static str,
        reason: String,
    },
}
