//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.
//!
//! Every read returns owned values. Callers can mutate what they get back
//! without touching the stored state.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::Role;

use crate::backend::domain::models::{Contribution, DahiraEvent, Member, ScheduleEntry, TourSchedule, User};

/// Outcome of an account change that must leave one active SUPER_ADMIN
#[derive(Debug, Clone, PartialEq)]
pub enum AccountUpdate {
    Updated(User),
    NotFound,
    /// Refused: the user is the last active SUPER_ADMIN. Carries the unchanged user.
    LastSuperAdmin(User),
}

/// Trait defining the interface for login account storage operations
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Store a new user
    async fn store_user(&self, user: &User) -> Result<()>;

    /// Retrieve a specific user by ID
    async fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    /// List all users in insertion order
    async fn list_users(&self) -> Result<Vec<User>>;

    /// All users registered with exactly this email, in insertion order
    async fn find_users_by_email(&self, email: &str) -> Result<Vec<User>>;

    /// First active user linked to the given member
    async fn find_active_user_for_member(&self, member_id: &str) -> Result<Option<User>>;

    /// Flip the active flag. The super admin check and the write happen
    /// under the same lock.
    async fn toggle_user_status(&self, user_id: &str) -> Result<AccountUpdate>;

    /// Change the role, with the same super admin check as the toggle
    async fn update_user_role(&self, user_id: &str, role: Role) -> Result<AccountUpdate>;
}

/// Trait defining the interface for member storage operations
#[async_trait]
pub trait MemberStorage: Send + Sync {
    /// Store a new member
    async fn store_member(&self, member: &Member) -> Result<()>;

    /// Retrieve a specific member by ID
    async fn get_member(&self, member_id: &str) -> Result<Option<Member>>;

    /// List all members in insertion order
    async fn list_members(&self) -> Result<Vec<Member>>;

    /// Replace a member's profile fields. The stored contribution list is kept.
    /// Returns false if the member does not exist.
    async fn update_member(&self, member: &Member) -> Result<bool>;

    /// Append a contribution to its member.
    /// Returns false, leaving the store untouched, if the member does not exist.
    async fn append_contribution(&self, contribution: &Contribution) -> Result<bool>;

    /// Every contribution across all members
    async fn list_contributions(&self) -> Result<Vec<Contribution>>;
}

/// Trait defining the interface for gathering snapshot storage operations
#[async_trait]
pub trait DahiraEventStorage: Send + Sync {
    /// Store a new event
    async fn store_event(&self, event: &DahiraEvent) -> Result<()>;

    /// List all events in insertion order
    async fn list_events(&self) -> Result<Vec<DahiraEvent>>;
}

/// Trait defining the interface for host rotation storage operations
#[async_trait]
pub trait TourScheduleStorage: Send + Sync {
    /// List all schedules in insertion order
    async fn list_schedules(&self) -> Result<Vec<TourSchedule>>;

    /// Schedules whose date lies in the half-open range [start, end)
    async fn list_schedules_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<TourSchedule>>;

    /// Upsert by date: every stored schedule sharing a date with an incoming
    /// entry is removed, then the entries are appended with fresh IDs.
    /// Returns the inserted schedules.
    async fn replace_schedules_by_date(&self, entries: Vec<ScheduleEntry>) -> Result<Vec<TourSchedule>>;

    /// Delete a single schedule
    /// Returns true if the schedule was found and deleted, false otherwise
    async fn delete_schedule(&self, schedule_id: &str) -> Result<bool>;
}
