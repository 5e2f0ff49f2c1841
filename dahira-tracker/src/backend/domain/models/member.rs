//! Domain models for members and their payments.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::Gender;
use uuid::Uuid;

/// A single payment toward a member's annual goal. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub id: String,
    pub member_id: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub recorded_by: String,
}

impl Contribution {
    pub fn generate_id() -> String {
        format!("contribution::{}", Uuid::new_v4())
    }
}

/// A person tracked for dues. Owns its contribution list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub phone: String,
    pub email: Option<String>,
    pub location: Option<String>,
    pub annual_goal: f64,
    pub contributions: Vec<Contribution>,
}

impl Member {
    pub fn generate_id() -> String {
        format!("member::{}", Uuid::new_v4())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn total_paid(&self) -> f64 {
        self.contributions.iter().map(|c| c.amount).sum()
    }

    /// Phone number with every whitespace character removed
    pub fn compact_phone(&self) -> String {
        strip_whitespace(&self.phone)
    }
}

pub fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}
