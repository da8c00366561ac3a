use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use famledger::cli::{
    handle_audit_command, handle_category_command, handle_export_command, handle_family_command,
    handle_plan_command, handle_report_command, handle_transaction_command, CategoryCommands,
    ExportFormat, FamilyCommands, PlanCommands, ReportCommands, TransactionCommands,
};
use famledger::config::{LedgerPaths, Settings};
use famledger::storage::{initialize_storage, needs_initialization, Storage};

#[derive(Parser)]
#[command(
    name = "famledger",
    version,
    about = "Family finance tracker with monthly plans and budget reports",
    long_about = "FamLedger records a household's income and expenses, keeps a \
                  monthly plan of what it expects to earn and spend, and reports \
                  how the month is going against that plan."
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory with default categories and roster
    Init,

    /// Show current configuration and paths
    Config,

    /// Transaction commands
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Monthly plan commands
    #[command(subcommand)]
    Plan(PlanCommands),

    /// Category commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Family roster commands
    #[command(subcommand)]
    Family(FamilyCommands),

    /// Reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export data to a file
    Export {
        #[arg(value_enum)]
        format: ExportFormat,
        path: PathBuf,
    },

    /// Show recent changes
    Audit {
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Only one kind of record: transaction, plan, category or member
        #[arg(short, long)]
        entity: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    famledger::log::init_logging(cli.verbose);

    run(cli).map_err(|err| {
        tracing::error!(error = %err, "command failed");
        err
    })
}

fn run(cli: Cli) -> Result<()> {
    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) if !needs_initialization(&paths) => {
            println!("FamLedger is already initialized at: {}", paths.base_dir().display());
        }
        Some(Commands::Init) => {
            println!("Initializing FamLedger at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Built-in income and expense categories and a default family roster");
            println!("have been created.");
            println!();
            println!("Run 'famledger category list' to see all categories.");
        }
        Some(Commands::Config) => {
            println!("FamLedger Configuration");
            println!("=======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Initialized:      {}", storage.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!("  Family mode:       {}", settings.family_mode);
            println!("  Savings goal rate: {:.0}%", settings.savings_goal_rate * 100.0);
            println!("  Near-budget at:    {:.0}%", settings.near_budget_pct);
            println!("  Default range:     {}", settings.default_range);
        }
        Some(Commands::Txn(cmd)) => handle_transaction_command(&storage, &settings, cmd)?,
        Some(Commands::Plan(cmd)) => handle_plan_command(&storage, &settings, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, cmd)?,
        Some(Commands::Family(cmd)) => handle_family_command(&storage, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Export { format, path }) => {
            handle_export_command(&storage, &settings, format, &path)?
        }
        Some(Commands::Audit { limit, entity }) => {
            handle_audit_command(&storage, limit, entity.as_deref())?
        }
        None => {
            println!("FamLedger - family finance tracker");
            println!();
            println!("Run 'famledger --help' for usage information.");
        }
    }

    Ok(())
}
