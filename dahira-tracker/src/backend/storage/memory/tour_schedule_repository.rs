use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use std::collections::HashSet;

use super::connection::MemoryConnection;
use crate::backend::domain::models::{ScheduleEntry, TourSchedule};
use crate::backend::storage::traits::TourScheduleStorage;

/// In-memory repository for the host rotation
#[derive(Clone)]
pub struct TourScheduleRepository {
    connection: MemoryConnection,
}

impl TourScheduleRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl TourScheduleStorage for TourScheduleRepository {
    async fn list_schedules(&self) -> Result<Vec<TourSchedule>> {
        let data = self.connection.data().read().await;
        Ok(data.schedules.clone())
    }

    async fn list_schedules_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<TourSchedule>> {
        let data = self.connection.data().read().await;
        Ok(data
            .schedules
            .iter()
            .filter(|s| s.date >= start && s.date < end)
            .cloned()
            .collect())
    }

    async fn replace_schedules_by_date(&self, entries: Vec<ScheduleEntry>) -> Result<Vec<TourSchedule>> {
        let incoming_dates: HashSet<NaiveDate> = entries.iter().map(|e| e.date).collect();
        let inserted: Vec<TourSchedule> = entries.into_iter().map(ScheduleEntry::into_schedule).collect();

        let mut data = self.connection.data().write().await;
        let before = data.schedules.len();
        data.schedules.retain(|s| !incoming_dates.contains(&s.date));
        debug!(
            "Replacing {} schedule(s) across {} date(s), {} existing row(s) removed",
            inserted.len(),
            incoming_dates.len(),
            before - data.schedules.len()
        );
        data.schedules.extend(inserted.iter().cloned());

        Ok(inserted)
    }

    async fn delete_schedule(&self, schedule_id: &str) -> Result<bool> {
        let mut data = self.connection.data().write().await;
        let before = data.schedules.len();
        data.schedules.retain(|s| s.id != schedule_id);
        Ok(data.schedules.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[tokio::test]
    async fn test_replace_by_date_latest_wins() {
        let repo = TourScheduleRepository::new(MemoryConnection::new());
        repo.replace_schedules_by_date(vec![entry("2024-03-03", "1"), entry("2024-03-10", "3")])
            .await
            .unwrap();
        repo.replace_schedules_by_date(vec![entry("2024-03-03", "2")]).await.unwrap();

        let schedules = repo.list_schedules().await.unwrap();
        assert_eq!(schedules.len(), 2);
        let march_third: Vec<_> = schedules.iter().filter(|s| s.date == date("2024-03-03")).collect();
        assert_eq!(march_third.len(), 1);
        assert_eq!(march_third[0].member_id, "2");
    }

    #[tokio::test]
    async fn test_list_between_is_half_open() {
        let repo = TourScheduleRepository::new(MemoryConnection::new());
        repo.replace_schedules_by_date(vec![
            entry("2024-02-29", "1"),
            entry("2024-03-01", "2"),
            entry("2024-03-31", "3"),
            entry("2024-04-01", "4"),
        ])
        .await
        .unwrap();

        let march = repo
            .list_schedules_between(date("2024-03-01"), date("2024-04-01"))
            .await
            .unwrap();
        let members: Vec<&str> = march.iter().map(|s| s.member_id.as_str()).collect();
        assert_eq!(members, vec!["2", "3"]);
    }

    #[tokio::test]
    async fn test_delete_schedule_reports_absence() {
        let repo = TourScheduleRepository::new(MemoryConnection::new());
        let inserted = repo.replace_schedules_by_date(vec![entry("2024-03-03", "1")]).await.unwrap();

        assert!(!repo.delete_schedule("missing").await.unwrap());
        assert!(repo.delete_schedule(&inserted[0].id).await.unwrap());
        assert!(repo.list_schedules().await.unwrap().is_empty());
    }
}
