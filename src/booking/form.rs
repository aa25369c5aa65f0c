//! Booking form data and its validation rules

use chrono::{Local, NaiveDate, NaiveTime};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("Por favor, informe {0}.")]
    MissingField(&'static str),

    #[error("Telefone inválido. Informe DDD + número (10 ou 11 dígitos).")]
    InvalidPhone,

    #[error("CPF inválido. Deve conter 11 dígitos.")]
    InvalidCpf,

    #[error("Data inválida: {0}")]
    InvalidDate(String),

    #[error("Escolha uma data a partir de amanhã.")]
    DateNotInFuture(NaiveDate),

    #[error("Horário inválido: {0}")]
    InvalidTime(String),
}

/// Booking form as submitted by the page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub observations: Option<String>,
}

/// Form that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedForm {
    pub name: String,
    pub phone: String,
    pub cpf: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub observations: Option<String>,
}

impl BookingForm {
    /// Validate against the local calendar
    pub fn validate(self) -> Result<ValidatedForm, FormError> {
        self.validate_on(Local::now().date_naive())
    }

    /// Validate with `today` as the reference day; the earliest bookable
    /// date is the day after it
    pub fn validate_on(self, today: NaiveDate) -> Result<ValidatedForm, FormError> {
        let name = required(&self.name, "seu nome")?;
        let phone = required(&self.phone, "seu telefone")?;
        let date = required(&self.date, "uma data")?;
        let time = required(&self.time, "um horário")?;

        let phone_digits = digit_count(&phone);
        if !(10..=11).contains(&phone_digits) {
            return Err(FormError::InvalidPhone);
        }

        let cpf = self.cpf.map(|c| c.trim().to_string()).filter(|c| !c.is_empty());
        if let Some(cpf) = &cpf {
            if digit_count(cpf) != 11 {
                return Err(FormError::InvalidCpf);
            }
        }

        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate(date.clone()))?;
        if date <= today {
            return Err(FormError::DateNotInFuture(date));
        }
        let time = NaiveTime::parse_from_str(&time, "%H:%M")
            .map_err(|_| FormError::InvalidTime(time.clone()))?;

        Ok(ValidatedForm {
            name,
            phone,
            cpf,
            date,
            time,
            observations: self
                .observations
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty()),
        })
    }
}

fn required(value: &str, what: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::MissingField(what));
    }
    Ok(trimmed.to_string())
}

fn digit_count(value: &str) -> usize {
    value.chars().filter(|c| c.is_ascii_digit()).count()
}
