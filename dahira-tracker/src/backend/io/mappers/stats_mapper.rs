//! Mappers for aggregation results.

use crate::backend::domain::stats_service::{
    DashboardStats as DomainDashboardStats, MemberStats as DomainMemberStats, MonthlyBucket, MonthlyReport,
};
use shared::{DashboardStats, MemberStats, MonthlyReportResponse, MonthlyTotal};

pub struct StatsMapper;

impl StatsMapper {
    pub fn member_stats_to_dto(domain: DomainMemberStats) -> MemberStats {
        MemberStats {
            member_id: domain.member_id,
            paid: domain.paid,
            remaining: domain.remaining,
            percent: domain.percent,
        }
    }

    pub fn dashboard_to_dto(domain: DomainDashboardStats) -> DashboardStats {
        DashboardStats {
            total_collected: domain.total_collected,
            total_expected: domain.total_expected,
            male_collected: domain.male_collected,
            female_collected: domain.female_collected,
            child_collected: domain.child_collected,
            member_count: domain.member_count,
            gap: domain.gap,
            percent_of_goal: domain.percent_of_goal,
        }
    }

    pub fn bucket_to_dto(bucket: &MonthlyBucket) -> MonthlyTotal {
        MonthlyTotal {
            key: bucket.month.to_string(),
            label: bucket.label.clone(),
            amount: bucket.amount,
            count: bucket.count,
        }
    }

    pub fn monthly_report_to_dto(report: &MonthlyReport) -> MonthlyReportResponse {
        MonthlyReportResponse {
            chart: report.ascending().iter().map(Self::bucket_to_dto).collect(),
            table: report.descending().iter().map(Self::bucket_to_dto).collect(),
            total: report.total(),
        }
    }
}
