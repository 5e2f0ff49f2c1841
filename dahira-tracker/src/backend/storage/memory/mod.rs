//! In-process storage backend.
//!
//! A single `MemoryConnection` owns every collection; each repository is a
//! cheap handle over it implementing one storage trait.

pub mod connection;
pub mod event_repository;
pub mod member_repository;
pub mod tour_schedule_repository;
pub mod user_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::{DataSet, MemoryConnection};
pub use event_repository::EventRepository;
pub use member_repository::MemberRepository;
pub use tour_schedule_repository::TourScheduleRepository;
pub use user_repository::UserRepository;
