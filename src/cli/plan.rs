//! Monthly plan CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_date, parse_kind, parse_month};
use crate::config::Settings;
use crate::display::{format_plan, format_plan_list};
use crate::error::LedgerResult;
use crate::services::{PlanEntryInput, PlanService};
use crate::storage::Storage;

/// Plan subcommands
#[derive(Subcommand, Debug)]
pub enum PlanCommands {
    /// Show the plan for a month (defaults to the current month)
    Show {
        /// Month as YYYY-MM
        month: Option<String>,
    },

    /// List every stored plan
    List,

    /// Add an expected income or expense
    Add {
        /// income or expense
        kind: String,
        /// Expected amount
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Family member the entry belongs to
        #[arg(short, long)]
        member: Option<String>,
        /// Free-text description
        #[arg(long)]
        note: Option<String>,
        /// Expected date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// Month as YYYY-MM (defaults to the current month)
        #[arg(long)]
        month: Option<String>,
    },

    /// Remove an entry by ID
    Remove {
        /// Entry ID (full or short)
        entry: String,
        #[arg(long)]
        month: Option<String>,
    },

    /// Replace the plan's notes
    Notes {
        text: String,
        #[arg(long)]
        month: Option<String>,
    },

    /// Delete the whole plan for a month
    Delete {
        month: Option<String>,
    },
}

/// Handle a plan command
pub fn handle_plan_command(storage: &Storage, settings: &Settings, cmd: PlanCommands) -> LedgerResult<()> {
    let service = PlanService::new(storage, settings);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        PlanCommands::Show { month } => {
            let plan = service.get_or_empty(parse_month(month.as_deref())?)?;
            print!("{}", format_plan(&plan, symbol));
        }

        PlanCommands::List => {
            print!("{}", format_plan_list(&service.list()?, symbol));
        }

        PlanCommands::Add {
            kind,
            amount,
            category,
            member,
            note,
            date,
            month,
        } => {
            let month = parse_month(month.as_deref())?;
            let kind = parse_kind(&kind)?;
            let (plan, entry) = service.add_entry(
                month,
                PlanEntryInput {
                    kind,
                    category,
                    amount: parse_amount(&amount)?,
                    family_member: member,
                    description: note,
                    date: date.as_deref().map(parse_date).transpose()?,
                },
            )?;

            println!(
                "Added {} entry {} ({} {})",
                kind.as_str(),
                entry.id.short(),
                entry.category,
                entry.amount.format_with_symbol(symbol)
            );
            print!("{}", format_plan(&plan, symbol));
        }

        PlanCommands::Remove { entry, month } => {
            let month = parse_month(month.as_deref())?;
            let (plan, removed) = service.remove_entry(month, &entry)?;
            println!("Removed entry {} ({})", removed.id.short(), removed.category);
            print!("{}", format_plan(&plan, symbol));
        }

        PlanCommands::Notes { text, month } => {
            let plan = service.set_notes(parse_month(month.as_deref())?, &text)?;
            println!("Notes for {} updated.", plan.month);
        }

        PlanCommands::Delete { month } => {
            let plan = service.delete(parse_month(month.as_deref())?)?;
            println!("Deleted plan for {}.", plan.month);
        }
    }

    Ok(())
}
