use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use payperiod::cli::{
    handle_category_command, handle_income_command, handle_summary_command,
    handle_transaction_command, CategoryCommands, IncomeCommands, TransactionCommands,
};
use payperiod::config::{PayperiodPaths, Settings};
use payperiod::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "payperiod",
    version,
    about = "Bi-monthly pay-period budgeting from the terminal",
    long_about = "payperiod splits every month into two budget periods (the 1st to \
                  the 15th and the 16th to month end), converts your income to a \
                  per-period figure, and tracks spending against per-category \
                  allocations."
)]
struct Cli {
    /// Base directory for settings and data
    #[arg(long, global = true, env = "PAYPERIOD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard for the current (or a given) period
    Summary {
        /// Any date in the period (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Income source commands
    #[command(subcommand)]
    Income(IncomeCommands),

    /// Budget category commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Transaction commands
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Create the settings file and empty data files
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "payperiod=warn".into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => PayperiodPaths::with_base_dir(dir),
        None => PayperiodPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    let storage = Storage::open(paths.clone())
        .with_context(|| format!("Failed to open data in {}", paths.data_dir().display()))?;

    match cli.command {
        Some(Commands::Summary { date }) => {
            handle_summary_command(&storage, &settings, date.as_deref())?;
        }
        Some(Commands::Income(cmd)) => {
            handle_income_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Txn(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing payperiod at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  payperiod income add Salary 30000 --frequency monthly");
            println!("  payperiod category add Groceries 5000");
            println!("  payperiod txn add 1200 --category Groceries");
            println!("  payperiod summary");
        }
        Some(Commands::Config) => {
            println!("payperiod configuration");
            println!("=======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Initialized:     {}", storage.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol:      {}", settings.currency_symbol);
            println!("  Date format:          {}", settings.date_format);
            println!("  Receipt limit:        {} bytes", settings.receipt_max_bytes);
            println!("  Receipt source limit: {} bytes", settings.receipt_source_max_bytes);
        }
        None => {
            handle_summary_command(&storage, &settings, None)?;
            println!();
            println!("Run 'payperiod --help' for usage information.");
        }
    }

    Ok(())
}
