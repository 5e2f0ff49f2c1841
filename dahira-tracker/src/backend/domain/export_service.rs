//! Export service domain logic for the Dahira tracker.
//!
//! Produces CSV content for the monthly contributions report and the member
//! balance sheet. Writing the content somewhere is left to the caller.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use log::info;

use crate::backend::domain::models::Member;
use crate::backend::domain::stats_service::{MemberStats, MonthlyReport, StatsService};

/// CSV document with a suggested file name
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub csv_data: String,
    pub filename: String,
}

#[derive(Clone)]
pub struct ExportService {
    stats: StatsService,
}

impl ExportService {
    pub fn new(stats: StatsService) -> Self {
        Self { stats }
    }

    pub async fn export_monthly_report(&self) -> Result<CsvExport> {
        info!("📄 EXPORT: Exporting monthly contributions report");
        let report = self.stats.monthly_contributions().await?;
        let csv_data = monthly_report_csv(&report)?;
        let filename = export_filename("rapport_mensuel", Utc::now().date_naive());
        info!(
            "✅ EXPORT: {} month(s) written to {} ({} bytes)",
            report.ascending().len(),
            filename,
            csv_data.len()
        );
        Ok(CsvExport { csv_data, filename })
    }

    pub async fn export_member_balances(&self) -> Result<CsvExport> {
        info!("📄 EXPORT: Exporting member balances");
        let balances = self.stats.all_member_stats().await?;
        let csv_data = member_balances_csv(&balances)?;
        let filename = export_filename("soldes_membres", Utc::now().date_naive());
        info!("✅ EXPORT: {} member(s) written to {}", balances.len(), filename);
        Ok(CsvExport { csv_data, filename })
    }
}

fn export_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}.csv", prefix, date.format("%Y%m%d"))
}

/// Months ascending, followed by a grand total line
pub fn monthly_report_csv(report: &MonthlyReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["month", "label", "amount", "count"])?;
    let mut count = 0;
    for bucket in report.ascending() {
        count += bucket.count;
        writer.write_record([
            bucket.month.to_string(),
            bucket.label.clone(),
            format!("{:.2}", bucket.amount),
            bucket.count.to_string(),
        ])?;
    }
    writer.write_record([
        "total".to_string(),
        "Total".to_string(),
        format!("{:.2}", report.total()),
        count.to_string(),
    ])?;
    into_string(writer)
}

pub fn member_balances_csv(balances: &[(Member, MemberStats)]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "member_id",
        "name",
        "gender",
        "annual_goal",
        "paid",
        "remaining",
        "percent",
    ])?;
    for (member, stats) in balances {
        writer.write_record([
            member.id.clone(),
            member.full_name(),
            member.gender.label().to_string(),
            format!("{:.2}", member.annual_goal),
            format!("{:.2}", stats.paid),
            format!("{:.2}", stats.remaining),
            format!("{:.1}", stats.percent),
        ])?;
    }
    into_string(writer)
}

fn into_string(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::memory::test_utils::TestEnvironment;

    #[tokio::test]
    async fn test_monthly_report_export() {
        let env = TestEnvironment::with_demo_data().await.unwrap();
        let export = env.export_service().export_monthly_report().await.unwrap();

        let lines: Vec<&str> = export.csv_data.lines().collect();
        assert_eq!(
            lines,
            vec![
                "month,label,amount,count",
                "2023-09,Septembre 2023,12000.00,1",
                "2023-10,Octobre 2023,5000.00,1",
                "2023-11,Novembre 2023,2000.00,1",
                "total,Total,19000.00,3",
            ]
        );
        assert!(export.filename.starts_with("rapport_mensuel_"));
        assert!(export.filename.ends_with(".csv"));
    }

    #[tokio::test]
    async fn test_member_balances_export() {
        let env = TestEnvironment::with_demo_data().await.unwrap();
        let export = env.export_service().export_member_balances().await.unwrap();

        let mut reader = csv::Reader::from_reader(export.csv_data.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][1], "Cheikh Fall");
        assert_eq!(&rows[0][4], "7000.00");
        assert_eq!(&rows[0][5], "5000.00");
        assert_eq!(&rows[1][6], "100.0");
        assert_eq!(&rows[2][2], "Garçon");
    }

    #[test]
    fn test_export_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(export_filename("soldes_membres", date), "soldes_membres_20240309.csv");
    }
}
