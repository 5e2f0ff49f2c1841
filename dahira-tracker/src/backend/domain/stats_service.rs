//! Aggregation over members, contributions and events.
//!
//! Everything here is recomputed from the current store on each call; there
//! is no cache to invalidate. The free functions are pure so the
//! presentation layer and the exports can share them.
//!
//! A member whose annual goal is 0 counts as fully paid: percent 100,
//! remaining 0.

use anyhow::Result;
use chrono::NaiveDate;
use log::debug;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::backend::config::DahiraConfig;
use crate::backend::domain::errors::DahiraError;
use crate::backend::domain::formatting::month_label;
use crate::backend::domain::models::{Contribution, DahiraEvent, Member, YearMonth};
use crate::backend::storage::{DahiraEventStorage, MemberStorage};

#[derive(Debug, Clone, PartialEq)]
pub struct MemberStats {
    pub member_id: String,
    pub paid: f64,
    pub remaining: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub total_collected: f64,
    pub total_expected: f64,
    pub male_collected: f64,
    pub female_collected: f64,
    pub child_collected: f64,
    pub member_count: usize,
    pub gap: f64,
    pub percent_of_goal: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBucket {
    pub month: YearMonth,
    pub label: String,
    pub amount: f64,
    pub count: usize,
}

/// Amounts grouped by calendar month
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyReport {
    buckets: Vec<MonthlyBucket>,
}

impl MonthlyReport {
    /// Oldest month first, the order charts use
    pub fn ascending(&self) -> &[MonthlyBucket] {
        &self.buckets
    }

    /// Newest month first, the order lists use
    pub fn descending(&self) -> Vec<MonthlyBucket> {
        self.buckets.iter().rev().cloned().collect()
    }

    pub fn total(&self) -> f64 {
        self.buckets.iter().map(|b| b.amount).sum()
    }
}

/// Share of `goal` covered by `paid`, clamped to 0..=100.
/// A zero goal is treated as already reached.
pub fn progress_percent(paid: f64, goal: f64) -> f64 {
    if goal <= 0.0 {
        return 100.0;
    }
    (paid / goal * 100.0).clamp(0.0, 100.0)
}

pub fn member_stats(member: &Member) -> MemberStats {
    let paid = member.total_paid();
    MemberStats {
        member_id: member.id.clone(),
        paid,
        remaining: (member.annual_goal - paid).max(0.0),
        percent: progress_percent(paid, member.annual_goal),
    }
}

pub fn dashboard_stats(members: &[Member]) -> DashboardStats {
    let mut stats = DashboardStats {
        member_count: members.len(),
        ..DashboardStats::default()
    };

    for member in members {
        stats.total_expected += member.annual_goal;
        let paid = member.total_paid();
        stats.total_collected += paid;
        if member.gender.is_male() {
            stats.male_collected += paid;
        }
        if member.gender.is_female() {
            stats.female_collected += paid;
        }
        if member.gender.is_child() {
            stats.child_collected += paid;
        }
    }

    stats.gap = stats.total_expected - stats.total_collected;
    stats.percent_of_goal = progress_percent(stats.total_collected, stats.total_expected);
    stats
}

/// Group dated amounts by YYYY-MM, summing amounts and counting entries
pub fn group_by_month<I>(entries: I) -> MonthlyReport
where
    I: IntoIterator<Item = (NaiveDate, f64)>,
{
    let mut grouped: BTreeMap<YearMonth, (f64, usize)> = BTreeMap::new();
    for (date, amount) in entries {
        let bucket = grouped.entry(YearMonth::of(date)).or_insert((0.0, 0));
        bucket.0 += amount;
        bucket.1 += 1;
    }

    MonthlyReport {
        buckets: grouped
            .into_iter()
            .map(|(month, (amount, count))| MonthlyBucket {
                month,
                label: month_label(month),
                amount,
                count,
            })
            .collect(),
    }
}

pub fn monthly_contributions(contributions: &[Contribution]) -> MonthlyReport {
    group_by_month(contributions.iter().map(|c| (c.date, c.amount)))
}

pub fn monthly_events(events: &[DahiraEvent]) -> MonthlyReport {
    group_by_month(events.iter().map(|e| (e.date, e.total())))
}

/// Most recent contributions first, at most `limit` of them
pub fn recent_contributions(mut contributions: Vec<Contribution>, limit: usize) -> Vec<Contribution> {
    contributions.sort_by(|a, b| b.date.cmp(&a.date));
    contributions.truncate(limit);
    contributions
}

/// Service that feeds the pure aggregations from storage
#[derive(Clone)]
pub struct StatsService {
    members: Arc<dyn MemberStorage>,
    events: Arc<dyn DahiraEventStorage>,
    config: Arc<DahiraConfig>,
}

impl StatsService {
    pub fn new(
        members: Arc<dyn MemberStorage>,
        events: Arc<dyn DahiraEventStorage>,
        config: Arc<DahiraConfig>,
    ) -> Self {
        Self {
            members,
            events,
            config,
        }
    }

    pub async fn dashboard(&self) -> Result<DashboardStats> {
        let members = self.members.list_members().await?;
        let stats = dashboard_stats(&members);
        debug!("Dashboard stats: {:?}", stats);
        Ok(stats)
    }

    pub async fn member_stats(&self, member_id: &str) -> Result<MemberStats> {
        let member = self
            .members
            .get_member(member_id)
            .await?
            .ok_or_else(|| DahiraError::not_found("Member", member_id))?;
        Ok(member_stats(&member))
    }

    /// Stats for every member, in member order
    pub async fn all_member_stats(&self) -> Result<Vec<(Member, MemberStats)>> {
        let members = self.members.list_members().await?;
        Ok(members
            .into_iter()
            .map(|m| {
                let stats = member_stats(&m);
                (m, stats)
            })
            .collect())
    }

    pub async fn monthly_contributions(&self) -> Result<MonthlyReport> {
        let contributions = self.members.list_contributions().await?;
        let report = monthly_contributions(&contributions);
        debug!("Grouped {} contributions into {} months", contributions.len(), report.ascending().len());
        Ok(report)
    }

    pub async fn monthly_events(&self) -> Result<MonthlyReport> {
        let events = self.events.list_events().await?;
        Ok(monthly_events(&events))
    }

    /// Latest contributions, bounded by the configured history limit
    pub async fn recent_history(&self) -> Result<Vec<Contribution>> {
        let contributions = self.members.list_contributions().await?;
        Ok(recent_contributions(contributions, self.config.recent_history_limit))
    }
}
