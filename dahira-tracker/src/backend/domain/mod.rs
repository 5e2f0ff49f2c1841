//! # Domain Module
//!
//! Contains all business logic for the Dahira dues tracker.
//!
//! Services here operate on domain models and the storage traits only; the
//! `io` layer translates them to the DTOs of the `shared` crate.
//!
//! ## Module Organization
//!
//! - **member_service**: Members, their profile updates and contributions
//! - **user_service**: Login accounts, activation and roles
//! - **auth_service**: Login resolution and Google account provisioning
//! - **event_service**: Collections recorded at each gathering
//! - **stats_service**: Per-member progress, dashboard totals, monthly grouping
//! - **planning** / **tour_service**: Host rotation drafts and their persistence
//! - **access**: Dashboard sections each role may open
//! - **reminder**: WhatsApp balance reminders
//! - **export_service**: CSV reports
//!
//! ## Business Rules
//!
//! - Contributions are only ever appended to an existing member
//! - A member with a zero goal has nothing left to pay
//! - At most one tour schedule exists per date
//! - The last active SUPER_ADMIN stays a SUPER_ADMIN and stays active

pub mod access;
pub mod auth_service;
pub mod commands;
pub mod credentials;
pub mod errors;
pub mod event_service;
pub mod export_service;
pub mod formatting;
pub mod member_service;
pub mod models;
pub mod planning;
pub mod reminder;
pub mod stats_service;
pub mod tour_service;
pub mod user_service;

pub use access::{landing_section, sections_for, RoleAccess};
pub use auth_service::{AccountLink, AuthService, GoogleLogin, Identity};
pub use credentials::{Argon2Verifier, CredentialVerifier};
pub use errors::{error_kind, DahiraError};
pub use event_service::EventService;
pub use export_service::{CsvExport, ExportService};
pub use member_service::MemberService;
pub use planning::{PlanningDraft, PlanningDuration, PlanningWindow};
pub use stats_service::StatsService;
pub use tour_service::{PendingDeletion, TourService};
pub use user_service::UserService;
