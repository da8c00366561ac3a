//! Report CLI commands

use clap::Subcommand;
use std::path::PathBuf;

use super::export::create_output;
use super::{parse_month, RangeArgs};
use crate::config::Settings;
use crate::error::LedgerResult;
use crate::reports::{DashboardReport, PlannerReport, WeekdayReport};
use crate::storage::Storage;
use std::io::Write;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Totals, breakdowns and timeline for a window
    Dashboard {
        #[command(flatten)]
        range: RangeArgs,
        /// Write CSV to this file instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Plan versus actual for a month
    Planner {
        /// Month as YYYY-MM (defaults to the current month)
        month: Option<String>,
        /// Write CSV to this file instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Average spending per weekday
    Weekdays {
        #[command(flatten)]
        range: RangeArgs,
    },
}

/// Handle a report command
pub fn handle_report_command(storage: &Storage, settings: &Settings, cmd: ReportCommands) -> LedgerResult<()> {
    match cmd {
        ReportCommands::Dashboard { range, output } => {
            let report = DashboardReport::generate(storage, settings, range.resolve(settings)?)?;
            match output {
                Some(path) => {
                    let mut writer = create_output(&path)?;
                    report.export_csv(&mut writer)?;
                    writer.flush()?;
                    println!("Dashboard exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal()),
            }
        }

        ReportCommands::Planner { month, output } => {
            let report = PlannerReport::generate(storage, settings, parse_month(month.as_deref())?)?;
            match output {
                Some(path) => {
                    let mut writer = create_output(&path)?;
                    report.export_csv(&mut writer)?;
                    writer.flush()?;
                    println!("Planner exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal()),
            }
        }

        ReportCommands::Weekdays { range } => {
            let report = WeekdayReport::generate(storage, settings, range.resolve(settings)?)?;
            print!("{}", report.format_terminal());
        }
    }

    Ok(())
}
