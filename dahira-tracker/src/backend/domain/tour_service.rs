//! Tour service: host rotation generation and persistence.
//!
//! Saving is an upsert keyed on the date. Within one batch the last row for
//! a date wins, so a batch never leaves two schedules on the same day.
//!
//! Deleting a stored schedule is a two-step commit: a
//! [`PendingDeletion`] can only be obtained from
//! [`TourService::request_schedule_deletion`], and nothing is removed until
//! it is passed back to [`TourService::confirm_schedule_deletion`].

use anyhow::Result;
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;

use crate::backend::domain::errors::DahiraError;
use crate::backend::domain::models::{ScheduleEntry, TourSchedule, YearMonth};
use crate::backend::domain::planning::{PlanningDraft, PlanningDuration, PlanningWindow};
use crate::backend::storage::TourScheduleStorage;

/// A confirmed intent to delete one stored schedule
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDeletion {
    schedule: TourSchedule,
}

impl PendingDeletion {
    pub fn schedule(&self) -> &TourSchedule {
        &self.schedule
    }
}

#[derive(Clone)]
pub struct TourService {
    schedules: Arc<dyn TourScheduleStorage>,
}

impl TourService {
    pub fn new(schedules: Arc<dyn TourScheduleStorage>) -> Self {
        Self { schedules }
    }

    /// Build the planning table for a window, merged with stored schedules
    pub async fn generate_planning(&self, start: YearMonth, duration: PlanningDuration) -> Result<PlanningDraft> {
        let window = PlanningWindow::new(start, duration);
        let existing = self
            .schedules
            .list_schedules_between(window.first_day(), window.end())
            .await?;
        let draft = PlanningDraft::build(window, &existing);
        debug!(
            "Generated planning from {} over {} month(s): {} row(s), {} stored",
            start,
            duration.months(),
            draft.rows().len(),
            existing.len()
        );
        Ok(draft)
    }

    /// Persist the complete rows of a draft
    pub async fn save_planning(&self, draft: &PlanningDraft) -> Result<Vec<TourSchedule>> {
        let entries = match draft.submission() {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Planning save rejected: {}", e);
                return Err(e.into());
            }
        };
        self.save_tour_schedules(entries).await
    }

    /// Upsert by date. Returns the stored schedules, one per distinct date.
    pub async fn save_tour_schedules(&self, mut entries: Vec<ScheduleEntry>) -> Result<Vec<TourSchedule>> {
        if entries.is_empty() {
            return Err(DahiraError::EmptySubmission.into());
        }
        for entry in &mut entries {
            entry.member_id = entry.member_id.trim().to_string();
            if entry.member_id.is_empty() {
                return Err(DahiraError::validation(format!("No host assigned on {}", entry.date)).into());
            }
        }

        let submitted = entries.len();
        let entries = last_entry_per_date(entries);
        if entries.len() < submitted {
            debug!("Collapsed {} duplicate date(s) in batch", submitted - entries.len());
        }

        let saved = self.schedules.replace_schedules_by_date(entries).await?;
        info!("Saved {} tour schedule(s)", saved.len());
        Ok(saved)
    }

    pub async fn list_tour_schedules(&self) -> Result<Vec<TourSchedule>> {
        self.schedules.list_schedules().await
    }

    /// Remove a schedule directly. Returns false if it was not stored.
    pub async fn delete_tour_schedule(&self, schedule_id: &str) -> Result<bool> {
        let deleted = self.schedules.delete_schedule(schedule_id).await?;
        if deleted {
            info!("Deleted tour schedule {}", schedule_id);
        } else {
            debug!("Tour schedule {} already absent", schedule_id);
        }
        Ok(deleted)
    }

    /// First step of a deletion: look the schedule up so it can be confirmed
    pub async fn request_schedule_deletion(&self, schedule_id: &str) -> Result<PendingDeletion> {
        let schedule = self
            .schedules
            .list_schedules()
            .await?
            .into_iter()
            .find(|s| s.id == schedule_id)
            .ok_or_else(|| DahiraError::not_found("Tour schedule", schedule_id))?;
        Ok(PendingDeletion { schedule })
    }

    /// Second step of a deletion. Returns the removed schedule.
    pub async fn confirm_schedule_deletion(&self, pending: PendingDeletion) -> Result<TourSchedule> {
        if !self.delete_tour_schedule(&pending.schedule.id).await? {
            return Err(DahiraError::not_found("Tour schedule", pending.schedule.id).into());
        }
        Ok(pending.schedule)
    }
}

/// Keep only the last entry for each date, in order of first appearance
fn last_entry_per_date(entries: Vec<ScheduleEntry>) -> Vec<ScheduleEntry> {
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();
    let mut unique: Vec<ScheduleEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        match index.get(&entry.date) {
            Some(&i) => unique[i] = entry,
            None => {
                index.insert(entry.date, unique.len());
                unique.push(entry);
            }
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::errors::error_kind;
    use crate::backend::storage::memory::test_utils::TestEnvironment;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(d: &str, member_id: &str) -> ScheduleEntry {
        ScheduleEntry {
            date: date(d),
            member_id: member_id.to_string(),
            note: None,
        }
    }

    async fn setup_test() -> TourService {
        TestEnvironment::with_demo_data().await.unwrap().tour_service()
    }

    #[tokio::test]
    async fn test_save_upserts_by_date() {
        let service = setup_test().await;

        service.save_tour_schedules(vec![entry("2024-03-03", "1")]).await.unwrap();
        service.save_tour_schedules(vec![entry("2024-03-03", "2")]).await.unwrap();

        let schedules = service.list_tour_schedules().await.unwrap();
        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0].date, date("2024-03-03"));
        assert_eq!(schedules[0].member_id, "2");
    }

    #[tokio::test]
    async fn test_saved_host_id_is_trimmed() {
        let service = setup_test().await;

        let saved = service.save_tour_schedules(vec![entry("2024-03-03", " 2 ")]).await.unwrap();
        assert_eq!(saved[0].member_id, "2");
        assert_eq!(service.list_tour_schedules().await.unwrap()[0].member_id, "2");

        let err = service
            .save_tour_schedules(vec![entry("2024-03-10", "   ")])
            .await
            .unwrap_err();
        assert!(matches!(error_kind(&err), Some(DahiraError::Validation(_))));
    }

    #[tokio::test]
    async fn test_duplicate_dates_in_batch_keep_last() {
        let service = setup_test().await;

        let saved = service
            .save_tour_schedules(vec![
                entry("2024-03-03", "1"),
                entry("2024-03-10", "2"),
                entry("2024-03-03", "3"),
            ])
            .await
            .unwrap();

        let rows: Vec<(NaiveDate, &str)> = saved.iter().map(|s| (s.date, s.member_id.as_str())).collect();
        assert_eq!(rows, vec![(date("2024-03-03"), "3"), (date("2024-03-10"), "2")]);
        assert_eq!(service.list_tour_schedules().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_save_is_rejected() {
        let service = setup_test().await;
        let err = service.save_tour_schedules(Vec::new()).await.unwrap_err();
        assert_eq!(error_kind(&err), Some(&DahiraError::EmptySubmission));

        let start: YearMonth = "2024-03".parse().unwrap();
        let draft = service
            .generate_planning(start, PlanningDuration::OneMonth)
            .await
            .unwrap();
        let err = service.save_planning(&draft).await.unwrap_err();
        assert_eq!(error_kind(&err), Some(&DahiraError::EmptySubmission));
        assert!(service.list_tour_schedules().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_edit_save_regenerate() {
        let service = setup_test().await;
        let start: YearMonth = "2024-03".parse().unwrap();
        let duration = PlanningDuration::try_from(1).unwrap();

        let mut draft = service.generate_planning(start, duration).await.unwrap();
        assert_eq!(draft.rows().len(), 5);
        let key = draft.rows()[1].key;
        draft.set_row_member(key, Some("1".to_string())).unwrap();
        let manual = draft.add_manual_row();
        draft.set_row_date(manual, Some(date("2024-03-13"))).unwrap();
        draft.set_row_member(manual, Some("3".to_string())).unwrap();

        let saved = service.save_planning(&draft).await.unwrap();
        assert_eq!(saved.len(), 2);

        let regenerated = service.generate_planning(start, duration).await.unwrap();
        let assigned: Vec<(NaiveDate, &str)> = regenerated
            .rows()
            .iter()
            .filter_map(|r| Some((r.date?, r.member_id.as_deref()?)))
            .collect();
        assert_eq!(assigned, vec![(date("2024-03-10"), "1"), (date("2024-03-13"), "3")]);
        assert_eq!(regenerated.rows().len(), 6);
    }

    #[tokio::test]
    async fn test_two_step_deletion() {
        let service = setup_test().await;
        let saved = service
            .save_tour_schedules(vec![entry("2024-03-03", "1"), entry("2024-03-10", "2")])
            .await
            .unwrap();

        let pending = service.request_schedule_deletion(&saved[0].id).await.unwrap();
        // Requesting alone removes nothing
        assert_eq!(service.list_tour_schedules().await.unwrap().len(), 2);
        assert_eq!(pending.schedule().member_id, "1");

        let removed = service.confirm_schedule_deletion(pending.clone()).await.unwrap();
        assert_eq!(removed.id, saved[0].id);
        let remaining = service.list_tour_schedules().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, saved[1].id);

        // Confirming twice fails instead of silently succeeding
        let err = service.confirm_schedule_deletion(pending).await.unwrap_err();
        assert!(matches!(error_kind(&err), Some(DahiraError::NotFound { .. })));

        let err = service.request_schedule_deletion("ghost").await.unwrap_err();
        assert!(matches!(error_kind(&err), Some(DahiraError::NotFound { .. })));
        assert!(!service.delete_tour_schedule("ghost").await.unwrap());
    }
}
