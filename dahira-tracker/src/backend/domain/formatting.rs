//! Display formatting for the fr-FR locale used across the dashboard.

use crate::backend::domain::models::YearMonth;

const MONTHS_FR: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin",
    "juillet", "août", "septembre", "octobre", "novembre", "décembre",
];

pub fn month_name_fr(month: u32) -> &'static str {
    MONTHS_FR
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

/// "Janvier 2024"
pub fn month_label(month: YearMonth) -> String {
    let name = month_name_fr(month.month());
    let mut chars = name.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("{} {}", capitalized, month.year())
}

/// Amount with space-separated thousands: 12000 -> "12 000", 1234.5 -> "1 234,50"
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    let sign = if negative && cents > 0 { "-" } else { "" };
    if fraction == 0 {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{},{:02}", sign, grouped, fraction)
    }
}

pub fn format_money(amount: f64, currency: &str) -> String {
    format!("{} {}", format_amount(amount), currency)
}
