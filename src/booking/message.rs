//! Order message handed off to WhatsApp

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

use super::form::ValidatedForm;
use super::summary::PriceSummary;
use crate::pricing::round_money;

const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Compose the order message sent to the salon.
///
/// Every amount comes from the price summary, so the message matches the
/// price the customer saw.
pub fn compose_order_message(
    business_name: &str,
    summary: &PriceSummary,
    form: &ValidatedForm,
) -> String {
    let mut lines = vec![
        format!("*NOVO AGENDAMENTO - {}*", business_name),
        String::new(),
        "*SERVIÇO:*".to_string(),
        format!("• {}", summary.service_name),
        format!("• Valor original: {}", brl(summary.original_price)),
    ];

    let mut discounts = Vec::new();
    if let Some(promotion) = &summary.promotion {
        discounts.push(format!(
            "• {}: {}% (-{})",
            promotion.name,
            promotion.percent,
            brl(promotion.amount)
        ));
    }
    if let Some(add_on) = &summary.add_on_discount {
        discounts.push(format!(
            "• Jumbo próprio: {}% (-{})",
            add_on.percent,
            brl(add_on.amount)
        ));
    }
    if !discounts.is_empty() {
        lines.push(String::new());
        lines.push("*DESCONTOS APLICADOS:*".to_string());
        lines.extend(discounts);
    }

    lines.push(String::new());
    lines.push("*VALOR FINAL:*".to_string());
    lines.push(format!("• {}", brl(summary.final_price)));

    lines.push(String::new());
    lines.push("*DADOS DO CLIENTE:*".to_string());
    lines.push(format!("• Nome: {}", form.name));
    lines.push(format!("• Telefone: {}", form.phone));
    if let Some(cpf) = &form.cpf {
        lines.push(format!("• CPF: {}", cpf));
    }

    lines.push(String::new());
    lines.push("*AGENDAMENTO:*".to_string());
    lines.push(format!("• Data: {}", long_date_pt(form.date)));
    lines.push(format!("• Horário: {}", form.time.format("%H:%M")));

    lines.push(String::new());
    lines.push("*JUMBO:*".to_string());
    lines.push(format!("• {}", summary.add_on_choice.label()));

    if let Some(observations) = &form.observations {
        lines.push(String::new());
        lines.push("*OBSERVAÇÕES:*".to_string());
        lines.push(observations.clone());
    }

    if let Some(promotion) = &summary.promotion {
        lines.push(String::new());
        lines.push("*PROMOÇÃO APLICADA:*".to_string());
        lines.push(format!("• {} - {}% OFF", promotion.name, promotion.percent));
    }

    lines.push(String::new());
    lines.push(
        "_Este agendamento foi feito através do site. Por favor, confirme a disponibilidade._"
            .to_string(),
    );

    lines.join("\n")
}

/// `wa.me` deep link opening a chat with `number` pre-filled with `message`
pub fn whatsapp_link(number: &str, message: &str) -> String {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    format!(
        "{}/{}?text={}",
        WHATSAPP_BASE_URL,
        digits,
        urlencoding::encode(message)
    )
}

/// `R$ 1234,50`
pub fn brl(amount: Decimal) -> String {
    format!("R$ {:.2}", round_money(amount, 2)).replace('.', ",")
}

/// `sexta-feira, 23 de outubro de 2026`
pub fn long_date_pt(date: NaiveDate) -> String {
    format!(
        "{}, {} de {} de {}",
        weekday_pt(date.weekday()),
        date.day(),
        month_pt(date.month()),
        date.year()
    )
}

fn weekday_pt(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "segunda-feira",
        Weekday::Tue => "terça-feira",
        Weekday::Wed => "quarta-feira",
        Weekday::Thu => "quinta-feira",
        Weekday::Fri => "sexta-feira",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

fn month_pt(month: u32) -> &'static str {
    match month {
        1 => "janeiro",
        2 => "fevereiro",
        3 => "março",
        4 => "abril",
        5 => "maio",
        6 => "junho",
        7 => "julho",
        8 => "agosto",
        9 => "setembro",
        10 => "outubro",
        11 => "novembro",
        _ => "dezembro",
    }
}
