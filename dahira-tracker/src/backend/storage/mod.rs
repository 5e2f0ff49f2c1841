//! # Storage Module
//!
//! Handles all data persistence operations for the Dahira tracker.
//!
//! The domain layer only sees the traits in [`traits`]; the in-memory
//! backend in [`memory`] is the one shipped today. A durable backend would
//! implement the same traits and keep writes serialized through one owner,
//! since the upsert-by-date schedule save is a read-modify-write.

pub mod memory;
pub mod traits;

pub use memory::{DataSet, EventRepository, MemberRepository, MemoryConnection, TourScheduleRepository, UserRepository};
pub use traits::{AccountUpdate, DahiraEventStorage, MemberStorage, TourScheduleStorage, UserStorage};
