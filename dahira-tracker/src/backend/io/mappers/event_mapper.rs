//! Mappers for gathering snapshots.

use super::{format_date, parse_date};
use crate::backend::domain::commands::event::CreateEventCommand;
use crate::backend::domain::errors::DahiraError;
use crate::backend::domain::models::DahiraEvent as DomainEvent;
use shared::{CreateDahiraEventRequest, DahiraEvent as SharedEvent};

pub struct EventMapper;

impl EventMapper {
    pub fn to_dto(domain: DomainEvent) -> SharedEvent {
        let total = domain.total();
        SharedEvent {
            id: domain.id,
            date: format_date(domain.date),
            host_name: domain.host_name,
            men_total: domain.men_total,
            women_total: domain.women_total,
            social_total: domain.social_total,
            total,
            recorded_by: domain.recorded_by,
        }
    }

    pub fn to_create_command(request: CreateDahiraEventRequest) -> Result<CreateEventCommand, DahiraError> {
        Ok(CreateEventCommand {
            date: parse_date(&request.date)?,
            host_name: request.host_name,
            men_total: request.men_total,
            women_total: request.women_total,
            social_total: request.social_total,
            recorded_by: request.recorded_by,
        })
    }
}
