use anyhow::Result;
use clap::{Parser, Subcommand};

use kinsenas::cli::{
    handle_budget_command, handle_expenses_command, handle_history_command, BudgetCommands,
    ExpensesCommands,
};
use kinsenas::config::{KinsenasPaths, Settings};

#[derive(Parser)]
#[command(
    name = "kinsenas",
    version,
    about = "Cutoff-based salary budgeting and monthly expense tracking",
    long_about = "Kinsenas splits a salary across two cutoff days, subtracts the \
                  recurring bills due on each, and tracks variable expenses \
                  month by month."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Recurring budget table commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Monthly expense commands
    #[command(subcommand, alias = "exp")]
    Expenses(ExpensesCommands),

    /// Show recent changes
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = KinsenasPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Budget(cmd)) => handle_budget_command(&paths, &settings, cmd)?,
        Some(Commands::Expenses(cmd)) => handle_expenses_command(&paths, &settings, cmd)?,
        Some(Commands::History { count }) => handle_history_command(&paths, count)?,
        Some(Commands::Config) => {
            println!("Kinsenas Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Audit enabled:   {}", settings.audit_enabled);
        }
        None => {
            println!("Kinsenas - cutoff-based salary budgeting");
            println!();
            println!("Run 'kinsenas --help' for usage information.");
            println!("Run 'kinsenas budget show' to see your budget.");
        }
    }

    Ok(())
}
