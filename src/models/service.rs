//! Salon service models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

use super::RecordError;

/// Target audience of a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "feminino")]
    Feminine,
    #[serde(rename = "masculino")]
    Masculine,
    #[default]
    #[serde(rename = "unissex", alias = "ambos")]
    Unisex,
}

impl Gender {
    /// Label shown next to a service
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Feminine => "Feminino",
            Gender::Masculine => "Masculino",
            Gender::Unisex => "Unissex",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    /// Parse the backend's gender column. A service tagged `ambos` serves
    /// everyone, which is what `unissex` means for a service.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "feminino" => Ok(Gender::Feminine),
            "masculino" => Ok(Gender::Masculine),
            "unissex" | "ambos" | "" => Ok(Gender::Unisex),
            other => Err(format!("unknown service gender '{}'", other)),
        }
    }
}

/// A bookable service, validated and ready for pricing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub original_price: Decimal,
    pub gender: Gender,
    /// Price already bundles the salon's own add-on (jumbo)
    pub includes_add_on: bool,
    /// Customer may bring their own add-on for a discount
    pub offers_add_on_discount: bool,
    /// Fraction off the post-promotion price when the customer brings the add-on
    #[serde(with = "rust_decimal::serde::str")]
    pub add_on_discount_rate: Decimal,
    pub duration_minutes: Option<i32>,
    pub image_url: Option<String>,
}

impl Service {
    /// Minimal service with only a price; everything else at its default
    pub fn priced(id: i64, name: impl Into<String>, original_price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            original_price,
            gender: Gender::default(),
            includes_add_on: false,
            offers_add_on_discount: false,
            add_on_discount_rate: Decimal::ZERO,
            duration_minutes: None,
            image_url: None,
        }
    }
}

/// Raw row from `services_with_price` (or the `services` table fallback)
#[derive(Debug, Clone, FromRow)]
pub struct ServiceRow {
    pub id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub original_price: Option<Decimal>,
    pub percentage_discount: Option<Decimal>,
    pub gender: Option<String>,
    pub includes_jumbo: Option<bool>,
    pub discount_with_jumbo: Option<bool>,
    pub duration: Option<i32>,
    pub image_url: Option<String>,
}

impl TryFrom<ServiceRow> for Service {
    type Error = RecordError;

    fn try_from(row: ServiceRow) -> Result<Self, Self::Error> {
        let original_price = row.original_price.ok_or(RecordError::MissingField {
            record: "service",
            id: row.id,
            field: "original_price",
        })?;

        let gender = match row.gender.as_deref() {
            Some(raw) => raw.parse().map_err(|reason| RecordError::InvalidValue {
                record: "service",
                id: row.id,
                field: "gender",
                reason,
            })?,
            None => Gender::Unisex,
        };

        Ok(Service {
            id: row.id,
            name: row.name.unwrap_or_default(),
            description: row.description.filter(|d| !d.trim().is_empty()),
            original_price,
            gender,
            includes_add_on: row.includes_jumbo.unwrap_or(false),
            offers_add_on_discount: row.discount_with_jumbo.unwrap_or(false),
            add_on_discount_rate: row.percentage_discount.unwrap_or(Decimal::ZERO),
            duration_minutes: row.duration,
            image_url: row.image_url.filter(|u| !u.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row() -> ServiceRow {
        ServiceRow {
            id: 7,
            name: Some("Box braids".to_string()),
            description: Some("  ".to_string()),
            original_price: Some(dec!(180.00)),
            percentage_discount: Some(dec!(0.15)),
            gender: Some("feminino".to_string()),
            includes_jumbo: Some(true),
            discount_with_jumbo: None,
            duration: Some(240),
            image_url: None,
        }
    }

    #[test]
    fn test_row_converts_into_service() {
        let service = Service::try_from(row()).unwrap();
        assert_eq!(service.original_price, dec!(180.00));
        assert_eq!(service.gender, Gender::Feminine);
        assert!(service.includes_add_on);
        assert!(!service.offers_add_on_discount);
        assert_eq!(service.add_on_discount_rate, dec!(0.15));
        assert_eq!(service.description, None);
    }

    #[test]
    fn test_missing_price_is_rejected() {
        let mut raw = row();
        raw.original_price = None;
        let err = Service::try_from(raw).unwrap_err();
        assert!(err.to_string().contains("original_price"));
    }

    #[test]
    fn test_missing_gender_defaults_to_unisex() {
        let mut raw = row();
        raw.gender = None;
        assert_eq!(Service::try_from(raw).unwrap().gender, Gender::Unisex);
    }

    #[test]
    fn test_service_tagged_ambos_is_unisex() {
        assert_eq!("ambos".parse::<Gender>(), Ok(Gender::Unisex));
        assert_eq!("Masculino".parse::<Gender>(), Ok(Gender::Masculine));
    }

    #[test]
    fn test_unknown_gender_is_rejected() {
        let mut raw = row();
        raw.gender = Some("kids".to_string());
        assert!(matches!(
            Service::try_from(raw),
            Err(RecordError::InvalidValue { field: "gender", .. })
        ));
    }
}
