//! # IO Module
//!
//! Adapter layer between a presentation layer and the domain logic.
//!
//! Requests arrive as `shared` DTOs, are mapped to domain commands, run
//! through the services held by [`crate::backend::AppState`], and the
//! results are mapped back to DTOs. Dates cross this boundary as ISO
//! `YYYY-MM-DD` strings and are parsed here.

pub mod api;
pub mod mappers;

pub use api::DahiraApi;
