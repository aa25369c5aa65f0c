//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::booking::{FormError, SelectionError};
use crate::models::RecordError;
use crate::pricing::responses::ErrorResponse;
use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid record: {0}")]
    Record(#[from] RecordError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn error_type(&self) -> &'static str {
        match self {
            AppError::NotFound => "not_found",
            AppError::Database(_) => "database",
            AppError::Record(_) => "invalid_record",
            AppError::Pricing(PricingError::InvalidServiceInput(_)) => "invalid_service_input",
            AppError::Pricing(PricingError::InvalidRateInput { .. }) => "invalid_rate_input",
            AppError::Selection(_) => "add_on_unavailable",
            AppError::Form(_) => "invalid_form",
            AppError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            AppError::Record(e) => {
                tracing::error!("Invalid record: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::Pricing(e) => {
                tracing::warn!("Pricing error: {}", e);
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            AppError::Selection(_) | AppError::Form(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };

        let body = ErrorResponse {
            error_type: self.error_type().to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(FormError::InvalidPhone).into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::from(PricingError::InvalidRateInput {
                field: "discount_rate",
                value: dec!(3)
            })
            .into_response()
            .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Internal("boom".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_type_names() {
        let err = AppError::from(PricingError::InvalidServiceInput("x".into()));
        assert_eq!(err.error_type(), "invalid_service_input");
    }
}
