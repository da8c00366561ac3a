//! Family roster CLI commands

use clap::Subcommand;

use crate::display::format_family_list;
use crate::error::LedgerResult;
use crate::services::{FamilyService, MemberInput};
use crate::storage::Storage;

#[derive(Subcommand, Debug)]
pub enum FamilyCommands {
    /// Show the roster
    List,

    /// Add a family member
    Add {
        name: String,
        /// e.g. parent, child
        #[arg(long)]
        role: String,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },

    /// Remove a family member (their transactions are kept)
    Remove { name: String },
}

pub fn handle_family_command(storage: &Storage, cmd: FamilyCommands) -> LedgerResult<()> {
    let service = FamilyService::new(storage);

    match cmd {
        FamilyCommands::List => print!("{}", format_family_list(&service.list()?)),
        FamilyCommands::Add {
            name,
            role,
            icon,
            color,
        } => {
            let member = service.add(MemberInput {
                name,
                role,
                icon,
                color,
            })?;
            println!("Added {} {} ({})", member.icon, member.name, member.role);
        }
        FamilyCommands::Remove { name } => {
            let member = service.remove(&name)?;
            println!("Removed {}", member.name);
        }
    }

    Ok(())
}
