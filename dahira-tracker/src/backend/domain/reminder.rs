//! WhatsApp balance reminder for a member.

use crate::backend::config::DahiraConfig;
use crate::backend::domain::formatting::format_money;
use crate::backend::domain::models::member::strip_whitespace;
use crate::backend::domain::models::Member;
use crate::backend::domain::stats_service::member_stats;

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceReminder {
    pub member_id: String,
    pub phone: String,
    pub message: String,
    pub url: String,
}

/// Strip whitespace and prefix the country code on local 9-digit
/// numbers starting with 7 (mobile) or 3 (landline)
pub fn normalize_phone(raw: &str, country_code: &str) -> String {
    let phone = strip_whitespace(raw);
    let is_local = phone.chars().count() == 9 && (phone.starts_with('7') || phone.starts_with('3'));
    if is_local {
        format!("{}{}", country_code, phone)
    } else {
        phone
    }
}

pub fn reminder_message(member: &Member, config: &DahiraConfig) -> String {
    let stats = member_stats(member);
    let currency = config.currency.as_str();
    format!(
        "As-salamu alaykum *{}*.\n\n\
         Voici votre situation pour le *{}* :\n\n\
         🔹 *Objectif Annuel :* {}\n\
         ✅ *Déjà Cotisé :* {}\n\
         ⚠️ *Reste à payer :* {}\n\n\
         Merci pour votre engagement !",
        member.full_name(),
        config.association_name,
        format_money(member.annual_goal, currency),
        format_money(stats.paid, currency),
        format_money(stats.remaining, currency),
    )
}

pub fn whatsapp_url(phone: &str, message: &str) -> String {
    format!("https://wa.me/{}?text={}", phone, urlencoding::encode(message))
}

pub fn balance_reminder(member: &Member, config: &DahiraConfig) -> BalanceReminder {
    let phone = normalize_phone(&member.phone, &config.default_country_code);
    let message = reminder_message(member, config);
    let url = whatsapp_url(&phone, &message);
    BalanceReminder {
        member_id: member.id.clone(),
        phone,
        message,
        url,
    }
}
