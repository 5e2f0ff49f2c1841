//! Domain model for the host rotation.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A member assigned to host the gathering on a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourSchedule {
    pub id: String,
    pub date: NaiveDate,
    pub member_id: String,
    pub note: Option<String>,
}

impl TourSchedule {
    pub fn generate_id() -> String {
        format!("tour::{}", Uuid::new_v4())
    }
}

/// Schedule row submitted for saving, before it gets an ID
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    pub date: NaiveDate,
    pub member_id: String,
    pub note: Option<String>,
}

impl ScheduleEntry {
    pub fn into_schedule(self) -> TourSchedule {
        TourSchedule {
            id: TourSchedule::generate_id(),
            date: self.date,
            member_id: self.member_id,
            note: self.note,
        }
    }
}
