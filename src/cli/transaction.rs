//! Transaction CLI commands

use chrono::Local;
use clap::Subcommand;

use super::{parse_amount, parse_date, parse_kind, RangeArgs};
use crate::aggregation::{group_by, GroupBy};
use crate::config::Settings;
use crate::display::{format_transaction_details, format_transaction_groups, format_transaction_table};
use crate::error::{LedgerError, LedgerResult};
use crate::services::{CreateTransactionInput, TransactionFilter, TransactionService, UpdateTransactionInput};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record an income or expense
    Add {
        /// income or expense
        kind: String,
        /// Amount (e.g. "300" or "12.50")
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Family member the transaction belongs to
        #[arg(short, long)]
        member: Option<String>,
        /// Free-text description
        #[arg(long)]
        note: Option<String>,
        /// Mark as recurring
        #[arg(long)]
        recurring: bool,
    },

    /// Change fields of a transaction
    Edit {
        /// Transaction ID (full or short)
        id: String,
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        member: Option<String>,
        #[arg(long)]
        note: Option<String>,
        /// true or false
        #[arg(long)]
        recurring: Option<bool>,
    },

    /// Show one transaction
    Show {
        /// Transaction ID (full or short)
        id: String,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID (full or short)
        id: String,
    },

    /// List transactions, newest first
    List {
        #[command(flatten)]
        range: RangeArgs,
        /// Only income or only expenses
        #[arg(long)]
        kind: Option<String>,
        /// Case-insensitive text to look for
        #[arg(short, long)]
        search: Option<String>,
        /// none, category, date or member
        #[arg(short, long, default_value = "none")]
        group_by: String,
        /// Maximum number of transactions
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    let service = TransactionService::new(storage, settings);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            category,
            date,
            member,
            note,
            recurring,
        } => {
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };
            let txn = service.create(CreateTransactionInput {
                kind: parse_kind(&kind)?,
                amount: parse_amount(&amount)?,
                category,
                date,
                family_member: member,
                description: note,
                is_recurring: recurring,
            })?;

            println!("Recorded transaction {}", txn.id.short());
            print!("{}", format_transaction_details(&txn, symbol));
        }

        TransactionCommands::Edit {
            id,
            kind,
            amount,
            category,
            date,
            member,
            note,
            recurring,
        } => {
            let input = UpdateTransactionInput {
                kind: kind.as_deref().map(parse_kind).transpose()?,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                category,
                date: date.as_deref().map(parse_date).transpose()?,
                family_member: member,
                description: note,
                is_recurring: recurring,
            };
            let txn = service.update(&id, input)?;

            println!("Updated transaction {}", txn.id.short());
            print!("{}", format_transaction_details(&txn, symbol));
        }

        TransactionCommands::Show { id } => {
            let txn = service.find(&id)?;
            print!("{}", format_transaction_details(&txn, symbol));
        }

        TransactionCommands::Delete { id } => {
            let txn = service.delete(&id)?;
            println!(
                "Deleted transaction {} ({} {} on {})",
                txn.id.short(),
                txn.category,
                txn.amount.format_with_symbol(symbol),
                txn.date
            );
        }

        TransactionCommands::List {
            range,
            kind,
            search,
            group_by: grouping,
            limit,
        } => {
            let grouping: GroupBy = grouping.parse().map_err(LedgerError::Validation)?;

            let mut filter = TransactionFilter::new().window(range.resolve(settings)?);
            if let Some(kind) = kind {
                filter = filter.kind(parse_kind(&kind)?);
            }
            if let Some(query) = search {
                filter = filter.search(query);
            }
            if let Some(limit) = limit {
                filter = filter.limit(limit);
            }

            let transactions = service.list(&filter)?;
            match grouping {
                GroupBy::None => print!(
                    "{}",
                    format_transaction_table(&transactions, symbol, &settings.date_format)
                ),
                other => print!(
                    "{}",
                    format_transaction_groups(
                        &group_by(&transactions, other),
                        symbol,
                        &settings.date_format
                    )
                ),
            }
        }
    }

    Ok(())
}
