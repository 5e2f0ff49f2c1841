use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use dahira_tracker::backend::config::DahiraConfig;
use dahira_tracker::backend::initialize_backend;
use dahira_tracker::backend::io::DahiraApi;
use shared::{LoginRequest, PlanningRequest};

#[derive(Parser)]
#[command(name = "dahira-tracker")]
#[command(about = "Membership dues tracker for a Dahira association")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a YAML configuration file
    #[arg(short, long, env = "DAHIRA_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Global collection totals - Default
    Dashboard,
    /// Members with their progress toward the annual goal
    Members,
    /// Amounts grouped by month
    Monthly {
        /// Group gathering collections instead of member contributions
        #[arg(long)]
        events: bool,
    },
    /// Host rotation for a window of months
    Planning {
        /// First month, YYYY-MM
        #[arg(long)]
        month: String,
        /// Number of months: 1, 3, 6 or 12
        #[arg(long, default_value_t = 1)]
        duration: u32,
    },
    /// WhatsApp balance reminder for one member
    Reminder {
        #[arg(long)]
        member: String,
    },
    /// Resolve a login and show the resulting session
    Login {
        /// Email address or phone number
        identifier: String,
        password: String,
    },
    /// CSV export
    Export {
        #[arg(value_enum)]
        report: ExportKind,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportKind {
    Monthly,
    Balances,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = DahiraConfig::load_or_default(cli.config.as_ref())?;
    let api = DahiraApi::new(initialize_backend(config).await?);

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => print_json(&api.dashboard_stats().await?)?,
        Commands::Members => {
            let members = api.get_members().await?;
            let stats = api.all_member_stats().await?;
            let rows: Vec<_> = members
                .into_iter()
                .zip(stats)
                .map(|(member, stats)| serde_json::json!({ "member": member, "stats": stats }))
                .collect();
            print_json(&rows)?
        }
        Commands::Monthly { events } => {
            let report = if events {
                api.monthly_events().await?
            } else {
                api.monthly_contributions().await?
            };
            print_json(&report)?
        }
        Commands::Planning { month, duration } => {
            let draft = api
                .generate_planning(PlanningRequest {
                    start_month: month,
                    duration_months: duration,
                })
                .await?;
            print_json(&api.planning_view(&draft).await?)?
        }
        Commands::Reminder { member } => print_json(&api.balance_reminder(&member).await?)?,
        Commands::Login { identifier, password } => {
            print_json(&api.login(LoginRequest { identifier, password }).await?)?
        }
        Commands::Export { report, output } => {
            let export = match report {
                ExportKind::Monthly => api.export_monthly_report().await?,
                ExportKind::Balances => api.export_member_balances().await?,
            };
            match output {
                Some(path) => {
                    fs::write(&path, &export.csv_data)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Wrote {} ({} bytes)", path.display(), export.csv_data.len());
                }
                None => print!("{}", export.csv_data),
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
