//! Calendar month value used for planning windows and monthly grouping.
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::backend::domain::errors::DahiraError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, DahiraError> {
        if !(1..=12).contains(&month) {
            return Err(DahiraError::InvalidMonth(format!("{:04}-{:02}", year, month)));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Month `offset` months after this one, rolling over year boundaries
    pub fn plus_months(&self, offset: u32) -> Self {
        let zero_based = self.month - 1 + offset;
        Self {
            year: self.year + (zero_based / 12) as i32,
            month: zero_based % 12 + 1,
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        // month is always 1..=12 and day 1 exists in every month
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Every date of this month, in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = *self;
        month
            .first_day()
            .iter_days()
            .take_while(move |d| YearMonth::of(*d) == month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = DahiraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DahiraError::InvalidMonth(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        YearMonth::new(year, month).map_err(|_| invalid())
    }
}
