//! Mappers for the host rotation.

use std::collections::HashMap;

use super::{format_date, parse_date};
use crate::backend::domain::errors::DahiraError;
use crate::backend::domain::models::{ScheduleEntry, TourSchedule as DomainSchedule};
use crate::backend::domain::planning::{PlanningDraft, PlanningRow as DomainPlanningRow};
use shared::{PlanningResponse, PlanningRow, ScheduleRowInput, TourSchedule as SharedSchedule};

pub struct TourMapper;

impl TourMapper {
    pub fn to_dto(domain: DomainSchedule) -> SharedSchedule {
        SharedSchedule {
            id: domain.id,
            date: format_date(domain.date),
            member_id: domain.member_id,
            note: domain.note,
        }
    }

    pub fn to_entry(input: ScheduleRowInput) -> Result<ScheduleEntry, DahiraError> {
        Ok(ScheduleEntry {
            date: parse_date(&input.date)?,
            member_id: input.member_id,
            note: input.note,
        })
    }

    /// `member_names` maps member IDs to display names for the host column
    pub fn row_to_dto(row: &DomainPlanningRow, member_names: &HashMap<String, String>) -> PlanningRow {
        PlanningRow {
            key: row.key,
            schedule_id: row.schedule_id.clone(),
            date: row.date.map(format_date),
            member_id: row.member_id.clone(),
            member_name: row
                .member_id
                .as_ref()
                .and_then(|id| member_names.get(id))
                .cloned(),
            note: row.note.clone(),
        }
    }

    pub fn draft_to_dto(draft: &PlanningDraft, member_names: &HashMap<String, String>) -> PlanningResponse {
        let window = draft.window();
        PlanningResponse {
            start_month: window.start.to_string(),
            duration_months: window.duration.months(),
            rows: draft
                .rows()
                .iter()
                .map(|row| Self::row_to_dto(row, member_names))
                .collect(),
        }
    }
}
