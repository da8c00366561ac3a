//! Category CLI commands

use clap::Subcommand;

use super::parse_kind;
use crate::display::format_category_list;
use crate::error::LedgerResult;
use crate::models::TransactionKind;
use crate::services::{CategoryInput, CategoryService};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List categories (both registries unless --kind is given)
    List {
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Add a custom category
    Add {
        /// income or expense
        kind: String,
        name: String,
        #[arg(long)]
        icon: Option<String>,
        /// Hex color, e.g. "#FF6B6B"
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Suggested ceiling as a share of income (0.15 = 15%)
        #[arg(long)]
        limit: Option<f64>,
    },

    /// Remove a custom category no transaction uses
    Remove {
        kind: String,
        name: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> LedgerResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List { kind } => {
            let kinds = match kind {
                Some(kind) => vec![parse_kind(&kind)?],
                None => vec![TransactionKind::Expense, TransactionKind::Income],
            };
            for (i, kind) in kinds.into_iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("{} categories", kind);
                print!("{}", format_category_list(&service.list(kind)?));
            }
        }

        CategoryCommands::Add {
            kind,
            name,
            icon,
            color,
            description,
            limit,
        } => {
            let category = service.add(CategoryInput {
                kind: parse_kind(&kind)?,
                name,
                icon,
                color,
                description,
                suggested_limit: limit,
            })?;
            println!("Added {} category '{}'", category.kind.as_str(), category.name);
        }

        CategoryCommands::Remove { kind, name } => {
            let category = service.remove(parse_kind(&kind)?, &name)?;
            println!("Removed {} category '{}'", category.kind.as_str(), category.name);
        }
    }

    Ok(())
}
