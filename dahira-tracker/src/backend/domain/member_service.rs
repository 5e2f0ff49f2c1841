//! Member service domain logic for the Dahira tracker.
//!
//! Registers members, updates their profiles and records their payments.
//!
//! ## Business Rules
//!
//! - First name, last name and phone are required
//! - Annual goals are finite and never negative
//! - Contribution amounts are finite and strictly positive
//! - A contribution for an unknown member is rejected and nothing is stored

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use crate::backend::config::DahiraConfig;
use crate::backend::domain::commands::member::{
    CreateMemberCommand, MemberSearchQuery, RecordContributionCommand, UpdateMemberCommand,
};
use crate::backend::domain::errors::DahiraError;
use crate::backend::domain::models::{Contribution, Member};
use crate::backend::storage::MemberStorage;

pub const UNKNOWN_MEMBER_NAME: &str = "Inconnu";

/// Service for managing members and their contributions
#[derive(Clone)]
pub struct MemberService {
    members: Arc<dyn MemberStorage>,
    config: Arc<DahiraConfig>,
}

impl MemberService {
    pub fn new(members: Arc<dyn MemberStorage>, config: Arc<DahiraConfig>) -> Self {
        Self { members, config }
    }

    /// Register a new member with an empty contribution list
    pub async fn add_member(&self, command: CreateMemberCommand) -> Result<Member> {
        info!("Adding member: {} {}", command.first_name, command.last_name);

        let annual_goal = command.annual_goal.unwrap_or(self.config.default_annual_goal);
        validate_annual_goal(annual_goal)?;

        let member = Member {
            id: Member::generate_id(),
            first_name: required(&command.first_name, "First name")?,
            last_name: required(&command.last_name, "Last name")?,
            gender: command.gender,
            phone: required(&command.phone, "Phone")?,
            email: optional(command.email),
            location: optional(command.location),
            annual_goal,
            contributions: Vec::new(),
        };

        self.members.store_member(&member).await?;
        info!("Added member {} with ID: {}", member.full_name(), member.id);
        Ok(member)
    }

    /// Apply a partial profile update
    pub async fn update_member(&self, member_id: &str, command: UpdateMemberCommand) -> Result<Member> {
        info!("Updating member: {}", member_id);

        let mut member = self
            .members
            .get_member(member_id)
            .await?
            .ok_or_else(|| DahiraError::not_found("Member", member_id))?;

        if let Some(first_name) = command.first_name {
            member.first_name = required(&first_name, "First name")?;
        }
        if let Some(last_name) = command.last_name {
            member.last_name = required(&last_name, "Last name")?;
        }
        if let Some(gender) = command.gender {
            member.gender = gender;
        }
        if let Some(phone) = command.phone {
            member.phone = required(&phone, "Phone")?;
        }
        if command.email.is_some() {
            member.email = optional(command.email);
        }
        if command.location.is_some() {
            member.location = optional(command.location);
        }
        if let Some(annual_goal) = command.annual_goal {
            validate_annual_goal(annual_goal)?;
            member.annual_goal = annual_goal;
        }

        if !self.members.update_member(&member).await? {
            return Err(DahiraError::not_found("Member", member_id).into());
        }
        // Re-read so the returned value carries the stored contributions
        self.members
            .get_member(member_id)
            .await?
            .ok_or_else(|| DahiraError::not_found("Member", member_id).into())
    }

    pub async fn get_member(&self, member_id: &str) -> Result<Option<Member>> {
        let member = self.members.get_member(member_id).await?;
        if member.is_none() {
            warn!("Member not found: {}", member_id);
        }
        Ok(member)
    }

    pub async fn list_members(&self) -> Result<Vec<Member>> {
        self.members.list_members().await
    }

    /// Case-insensitive match on "first last", optionally restricted to one gender
    pub async fn search_members(&self, query: MemberSearchQuery) -> Result<Vec<Member>> {
        let term = query.term.trim().to_lowercase();
        let members = self.members.list_members().await?;
        Ok(members
            .into_iter()
            .filter(|m| term.is_empty() || m.full_name().to_lowercase().contains(&term))
            .filter(|m| query.gender.map_or(true, |g| m.gender == g))
            .collect())
    }

    /// Record a payment for an existing member
    pub async fn add_contribution(&self, command: RecordContributionCommand) -> Result<Contribution> {
        info!(
            "Recording contribution of {} for member {} on {}",
            command.amount, command.member_id, command.date
        );

        if !command.amount.is_finite() || command.amount <= 0.0 {
            return Err(DahiraError::validation("Contribution amount must be positive").into());
        }

        let contribution = Contribution {
            id: Contribution::generate_id(),
            member_id: command.member_id,
            amount: command.amount,
            date: command.date,
            recorded_by: command.recorded_by,
        };

        if !self.members.append_contribution(&contribution).await? {
            warn!("Rejected contribution for unknown member {}", contribution.member_id);
            return Err(DahiraError::not_found("Member", contribution.member_id).into());
        }

        info!("Recorded contribution {}", contribution.id);
        Ok(contribution)
    }

    pub async fn list_all_contributions(&self) -> Result<Vec<Contribution>> {
        self.members.list_contributions().await
    }

    /// One member's payments, newest first
    pub async fn member_history(&self, member_id: &str) -> Result<Vec<Contribution>> {
        let member = self
            .members
            .get_member(member_id)
            .await?
            .ok_or_else(|| DahiraError::not_found("Member", member_id))?;
        let mut history = member.contributions;
        history.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(history)
    }

    /// Display name for a member ID, "Inconnu" when absent
    pub async fn member_name(&self, member_id: &str) -> Result<String> {
        Ok(self
            .members
            .get_member(member_id)
            .await?
            .map(|m| m.full_name())
            .unwrap_or_else(|| UNKNOWN_MEMBER_NAME.to_string()))
    }
}

fn required(value: &str, field: &str) -> Result<String, DahiraError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DahiraError::validation(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_annual_goal(goal: f64) -> Result<(), DahiraError> {
    if !goal.is_finite() || goal < 0.0 {
        return Err(DahiraError::validation("Annual goal cannot be negative"));
    }
    Ok(())
}
