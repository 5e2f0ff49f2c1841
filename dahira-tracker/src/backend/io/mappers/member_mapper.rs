//! Mappers for converting between member domain models and shared DTOs.

use super::{format_date, parse_date};
use crate::backend::domain::commands::member::{
    CreateMemberCommand, MemberSearchQuery, RecordContributionCommand, UpdateMemberCommand,
};
use crate::backend::domain::errors::DahiraError;
use crate::backend::domain::models::{Contribution as DomainContribution, Member as DomainMember};
use shared::{
    AddContributionRequest, Contribution as SharedContribution, CreateMemberRequest, Member as SharedMember,
    MemberSearchRequest, UpdateMemberRequest,
};

pub struct MemberMapper;

impl MemberMapper {
    pub fn to_dto(domain: DomainMember) -> SharedMember {
        SharedMember {
            id: domain.id,
            first_name: domain.first_name,
            last_name: domain.last_name,
            gender: domain.gender,
            phone: domain.phone,
            email: domain.email,
            location: domain.location,
            annual_goal: domain.annual_goal,
            contributions: domain
                .contributions
                .into_iter()
                .map(Self::contribution_to_dto)
                .collect(),
        }
    }

    pub fn contribution_to_dto(domain: DomainContribution) -> SharedContribution {
        SharedContribution {
            id: domain.id,
            member_id: domain.member_id,
            amount: domain.amount,
            date: format_date(domain.date),
            recorded_by: domain.recorded_by,
        }
    }

    pub fn to_create_command(request: CreateMemberRequest) -> CreateMemberCommand {
        CreateMemberCommand {
            first_name: request.first_name,
            last_name: request.last_name,
            gender: request.gender,
            phone: request.phone,
            email: request.email,
            location: request.location,
            annual_goal: request.annual_goal,
        }
    }

    pub fn to_update_command(request: UpdateMemberRequest) -> UpdateMemberCommand {
        UpdateMemberCommand {
            first_name: request.first_name,
            last_name: request.last_name,
            gender: request.gender,
            phone: request.phone,
            email: request.email,
            location: request.location,
            annual_goal: request.annual_goal,
        }
    }

    pub fn to_search_query(request: MemberSearchRequest) -> MemberSearchQuery {
        MemberSearchQuery {
            term: request.term,
            gender: request.gender,
        }
    }

    pub fn to_contribution_command(request: AddContributionRequest) -> Result<RecordContributionCommand, DahiraError> {
        Ok(RecordContributionCommand {
            member_id: request.member_id,
            amount: request.amount,
            date: parse_date(&request.date)?,
            recorded_by: request.recorded_by,
        })
    }
}
