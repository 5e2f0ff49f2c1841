//! Host rotation planning.
//!
//! A draft is built from the Sundays of a window of months plus whatever
//! schedules are already stored inside that window. Stored rows are kept as
//! they are, even off-Sunday ones, and every Sunday without a stored row gets
//! an unassigned placeholder. Edits to the draft stay local until
//! [`PlanningDraft::submission`] hands the complete rows to the store.

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashSet;

use crate::backend::domain::errors::DahiraError;
use crate::backend::domain::models::{ScheduleEntry, TourSchedule, YearMonth};

/// Number of months a planning window may span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanningDuration {
    OneMonth,
    ThreeMonths,
    SixMonths,
    TwelveMonths,
}

impl PlanningDuration {
    pub const ALL: [PlanningDuration; 4] = [
        PlanningDuration::OneMonth,
        PlanningDuration::ThreeMonths,
        PlanningDuration::SixMonths,
        PlanningDuration::TwelveMonths,
    ];

    pub fn months(&self) -> u32 {
        match self {
            PlanningDuration::OneMonth => 1,
            PlanningDuration::ThreeMonths => 3,
            PlanningDuration::SixMonths => 6,
            PlanningDuration::TwelveMonths => 12,
        }
    }
}

impl TryFrom<u32> for PlanningDuration {
    type Error = DahiraError;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        PlanningDuration::ALL
            .iter()
            .copied()
            .find(|d| d.months() == months)
            .ok_or(DahiraError::InvalidPlanningDuration(months))
    }
}

/// Half-open date range covered by a planning window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanningWindow {
    pub start: YearMonth,
    pub duration: PlanningDuration,
}

impl PlanningWindow {
    pub fn new(start: YearMonth, duration: PlanningDuration) -> Self {
        Self { start, duration }
    }

    pub fn months(&self) -> impl Iterator<Item = YearMonth> {
        let start = self.start;
        (0..self.duration.months()).map(move |i| start.plus_months(i))
    }

    /// First day of the window, inclusive
    pub fn first_day(&self) -> NaiveDate {
        self.start.first_day()
    }

    /// First day of the month after the window, exclusive
    pub fn end(&self) -> NaiveDate {
        self.start.plus_months(self.duration.months()).first_day()
    }

    /// Every Sunday in the window, ascending
    pub fn sundays(&self) -> Vec<NaiveDate> {
        self.months().flat_map(sundays_in_month).collect()
    }
}

pub fn sundays_in_month(month: YearMonth) -> Vec<NaiveDate> {
    month.days().filter(|d| d.weekday() == Weekday::Sun).collect()
}

/// One editable line of the planning table.
///
/// `key` identifies the row inside its draft; `schedule_id` is set only for
/// rows that came from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanningRow {
    pub key: u64,
    pub schedule_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub member_id: Option<String>,
    pub note: Option<String>,
}

impl PlanningRow {
    pub fn is_persisted(&self) -> bool {
        self.schedule_id.is_some()
    }

    fn to_entry(&self) -> Option<ScheduleEntry> {
        let member_id = self.member_id.as_deref().map(str::trim).filter(|m| !m.is_empty())?;
        Some(ScheduleEntry {
            date: self.date?,
            member_id: member_id.to_string(),
            note: self.note.clone().filter(|n| !n.trim().is_empty()),
        })
    }
}

#[derive(Debug, Clone)]
pub struct PlanningDraft {
    window: PlanningWindow,
    rows: Vec<PlanningRow>,
    next_key: u64,
}

impl PlanningDraft {
    /// Merge the window's Sundays with the stored schedules.
    /// Schedules outside the window are ignored.
    pub fn build(window: PlanningWindow, existing: &[TourSchedule]) -> Self {
        let mut draft = Self {
            window,
            rows: Vec::new(),
            next_key: 0,
        };

        let (first, end) = (window.first_day(), window.end());
        let mut covered = HashSet::new();
        for schedule in existing.iter().filter(|s| s.date >= first && s.date < end) {
            covered.insert(schedule.date);
            draft.push(PlanningRow {
                key: 0,
                schedule_id: Some(schedule.id.clone()),
                date: Some(schedule.date),
                member_id: Some(schedule.member_id.clone()),
                note: schedule.note.clone(),
            });
        }

        for sunday in window.sundays() {
            if !covered.contains(&sunday) {
                draft.push(PlanningRow {
                    key: 0,
                    schedule_id: None,
                    date: Some(sunday),
                    member_id: None,
                    note: None,
                });
            }
        }

        // Stable sort keeps stored rows ahead of placeholders on equal dates
        draft.rows.sort_by_key(|r| r.date);
        draft
    }

    pub fn window(&self) -> PlanningWindow {
        self.window
    }

    pub fn rows(&self) -> &[PlanningRow] {
        &self.rows
    }

    pub fn row(&self, key: u64) -> Option<&PlanningRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    /// Append an unassigned row dated on the first day of the start month
    pub fn add_manual_row(&mut self) -> u64 {
        self.push(PlanningRow {
            key: 0,
            schedule_id: None,
            date: Some(self.window.first_day()),
            member_id: None,
            note: None,
        })
    }

    /// Drop a row from the draft only; stored schedules are untouched
    pub fn remove_row(&mut self, key: u64) -> Option<PlanningRow> {
        let index = self.rows.iter().position(|r| r.key == key)?;
        Some(self.rows.remove(index))
    }

    pub fn set_row_date(&mut self, key: u64, date: Option<NaiveDate>) -> Result<(), DahiraError> {
        self.row_mut(key)?.date = date;
        Ok(())
    }

    pub fn set_row_member(&mut self, key: u64, member_id: Option<String>) -> Result<(), DahiraError> {
        self.row_mut(key)?.member_id = member_id;
        Ok(())
    }

    pub fn set_row_note(&mut self, key: u64, note: Option<String>) -> Result<(), DahiraError> {
        self.row_mut(key)?.note = note;
        Ok(())
    }

    /// Rows with both a date and a member, ready for saving.
    /// Fails with `EmptySubmission` when no row qualifies.
    pub fn submission(&self) -> Result<Vec<ScheduleEntry>, DahiraError> {
        let entries: Vec<ScheduleEntry> = self.rows.iter().filter_map(PlanningRow::to_entry).collect();
        if entries.is_empty() {
            return Err(DahiraError::EmptySubmission);
        }
        Ok(entries)
    }

    fn push(&mut self, mut row: PlanningRow) -> u64 {
        self.next_key += 1;
        row.key = self.next_key;
        self.rows.push(row);
        self.next_key
    }

    fn row_mut(&mut self, key: u64) -> Result<&mut PlanningRow, DahiraError> {
        self.rows
            .iter_mut()
            .find(|r| r.key == key)
            .ok_or_else(|| DahiraError::not_found("Planning row", key.to_string()))
    }
}
