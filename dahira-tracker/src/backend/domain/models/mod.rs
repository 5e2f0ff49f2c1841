//! Domain models for the Dahira tracker.

pub mod event;
pub mod member;
pub mod tour_schedule;
pub mod user;
pub mod year_month;

pub use event::DahiraEvent;
pub use member::{Contribution, Member};
pub use tour_schedule::{ScheduleEntry, TourSchedule};
pub use user::User;
pub use year_month::YearMonth;
