//! Domain model for a gathering's collection totals.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DahiraEvent {
    pub id: String,
    pub date: NaiveDate,
    pub host_name: String,
    pub men_total: f64,
    pub women_total: f64,
    pub social_total: f64,
    pub recorded_by: String,
}

impl DahiraEvent {
    pub fn generate_id() -> String {
        format!("event::{}", Uuid::new_v4())
    }

    pub fn total(&self) -> f64 {
        self.men_total + self.women_total + self.social_total
    }
}
