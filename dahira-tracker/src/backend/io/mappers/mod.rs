//! Conversions between domain models and the DTOs of the `shared` crate.

pub mod event_mapper;
pub mod identity_mapper;
pub mod member_mapper;
pub mod stats_mapper;
pub mod tour_mapper;
pub mod user_mapper;

pub use event_mapper::EventMapper;
pub use identity_mapper::IdentityMapper;
pub use member_mapper::MemberMapper;
pub use stats_mapper::StatsMapper;
pub use tour_mapper::TourMapper;
pub use user_mapper::UserMapper;

use chrono::NaiveDate;

use crate::backend::domain::errors::DahiraError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO `YYYY-MM-DD` date coming from the presentation layer
pub fn parse_date(value: &str) -> Result<NaiveDate, DahiraError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| DahiraError::validation(format!("Invalid date '{}', expected YYYY-MM-DD", value)))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = parse_date(" 2024-03-03 ").unwrap();
        assert_eq!(format_date(date), "2024-03-03");
        assert!(matches!(parse_date("03/03/2024"), Err(DahiraError::Validation(_))));
        assert!(parse_date("2024-02-30").is_err());
    }
}
