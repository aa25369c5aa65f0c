//! Site-wide promotion models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

use super::RecordError;

/// Audience a promotion is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PromotionTarget {
    #[serde(rename = "feminino")]
    Feminine,
    #[serde(rename = "masculino")]
    Masculine,
    #[serde(rename = "unissex")]
    Unisex,
    /// Every service, regardless of its gender
    #[default]
    #[serde(rename = "ambos")]
    Both,
}

impl FromStr for PromotionTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "feminino" => Ok(PromotionTarget::Feminine),
            "masculino" => Ok(PromotionTarget::Masculine),
            "unissex" => Ok(PromotionTarget::Unisex),
            "ambos" | "" => Ok(PromotionTarget::Both),
            other => Err(format!("unknown promotion gender '{}'", other)),
        }
    }
}

/// The active promotion, validated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: Option<i64>,
    pub name: String,
    /// Fraction off a service's original price
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_rate: Decimal,
    pub target: PromotionTarget,
    pub is_active: bool,
    /// Header colours chosen for the campaign, passed through untouched
    pub header_bg_color: Option<String>,
    pub header_text_color: Option<String>,
}

impl Promotion {
    pub const DEFAULT_NAME: &'static str = "Promoção";

    pub fn new(name: impl Into<String>, discount_rate: Decimal, target: PromotionTarget) -> Self {
        Self {
            id: None,
            name: name.into(),
            discount_rate,
            target,
            is_active: true,
            header_bg_color: None,
            header_text_color: None,
        }
    }
}

/// Raw row from the `promotions` table
#[derive(Debug, Clone, FromRow)]
pub struct PromotionRow {
    pub id: i64,
    pub name: Option<String>,
    pub percentage_discount: Option<Decimal>,
    pub gender: Option<String>,
    pub is_active: Option<bool>,
    pub header_bg_color: Option<String>,
    pub header_text_color: Option<String>,
}

impl TryFrom<PromotionRow> for Promotion {
    type Error = RecordError;

    fn try_from(row: PromotionRow) -> Result<Self, Self::Error> {
        let discount_rate = row.percentage_discount.ok_or(RecordError::MissingField {
            record: "promotion",
            id: row.id,
            field: "percentage_discount",
        })?;

        let target = match row.gender.as_deref() {
            Some(raw) => raw.parse().map_err(|reason| RecordError::InvalidValue {
                record: "promotion",
                id: row.id,
                field: "gender",
                reason,
            })?,
            None => PromotionTarget::Both,
        };

        Ok(Promotion {
            id: Some(row.id),
            name: row
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| Self::DEFAULT_NAME.to_string()),
            discount_rate,
            target,
            is_active: row.is_active.unwrap_or(false),
            header_bg_color: row.header_bg_color.filter(|c| !c.is_empty()),
            header_text_color: row.header_text_color.filter(|c| !c.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_row_without_gender_targets_everyone() {
        let row = PromotionRow {
            id: 1,
            name: None,
            percentage_discount: Some(dec!(0.20)),
            gender: None,
            is_active: Some(true),
            header_bg_color: Some("#e91e63".to_string()),
            header_text_color: Some(String::new()),
        };

        let promotion = Promotion::try_from(row).unwrap();
        assert_eq!(promotion.target, PromotionTarget::Both);
        assert_eq!(promotion.name, Promotion::DEFAULT_NAME);
        assert_eq!(promotion.header_bg_color.as_deref(), Some("#e91e63"));
        assert_eq!(promotion.header_text_color, None);
    }

    #[test]
    fn test_row_without_rate_is_rejected() {
        let row = PromotionRow {
            id: 2,
            name: Some("Black Friday".to_string()),
            percentage_discount: None,
            gender: Some("ambos".to_string()),
            is_active: Some(true),
            header_bg_color: None,
            header_text_color: None,
        };

        assert!(matches!(
            Promotion::try_from(row),
            Err(RecordError::MissingField { field: "percentage_discount", .. })
        ));
    }

    #[test]
    fn test_target_deserializes_from_backend_strings() {
        let target: PromotionTarget = serde_json::from_str("\"masculino\"").unwrap();
        assert_eq!(target, PromotionTarget::Masculine);
        let target: PromotionTarget = serde_json::from_str("\"ambos\"").unwrap();
        assert_eq!(target, PromotionTarget::Both);
    }
}
