//! Budget CLI commands
//!
//! Show and edit the recurring cutoff table.

use clap::Subcommand;

use super::warn_on_audit_error;
use crate::audit::AuditLogger;
use crate::config::{KinsenasPaths, Settings};
use crate::display::format_budget;
use crate::error::{KinsenasError, KinsenasResult};
use crate::models::{format_amount, BudgetRow, BudgetRowEdit, BudgetRowId, Cutoff};
use crate::services::BudgetStore;
use crate::storage::{open_store, JsonFileStore};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show the budget table, totals and remaining balances
    Show,

    /// Append a blank row
    AddRow,

    /// Remove the last row (the salary row is never removed)
    RemoveRow,

    /// Edit a row's name or amounts
    Edit {
        /// Row number (1-based) or row ID
        row: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// Amount due on the first cutoff
        #[arg(short, long, allow_hyphen_values = true)]
        first: Option<String>,
        /// Amount due on the second cutoff
        #[arg(short, long, allow_hyphen_values = true)]
        second: Option<String>,
    },

    /// Set a cutoff day (clamped to 1-31)
    Cutoff {
        /// Which cutoff: first or second
        which: Cutoff,
        /// Day of the month
        #[arg(allow_negative_numbers = true)]
        day: i64,
    },
}

/// Open the budget store with auditing configured from settings
pub fn open_budget_store(
    paths: &KinsenasPaths,
    settings: &Settings,
) -> KinsenasResult<BudgetStore<JsonFileStore>> {
    let store = BudgetStore::load(open_store(paths)?);
    Ok(if settings.audit_enabled {
        store.with_audit(AuditLogger::new(paths.audit_log()))
    } else {
        store
    })
}

/// Handle a budget command
pub fn handle_budget_command(
    paths: &KinsenasPaths,
    settings: &Settings,
    cmd: BudgetCommands,
) -> KinsenasResult<()> {
    let mut store = open_budget_store(paths, settings)?;
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Show => {
            print!("{}", format_budget(&store, symbol));
        }
        BudgetCommands::AddRow => {
            let id = store.add_row()?;
            println!("Added row {} ({})", store.rows().len(), id);
        }
        BudgetCommands::RemoveRow => match store.remove_last_row()? {
            Some(row) => println!("Removed row '{}'", display_name(&row)),
            None => println!("The salary row cannot be removed."),
        },
        BudgetCommands::Edit {
            row,
            name,
            first,
            second,
        } => {
            let id = resolve_row(store.rows(), &row)?;

            let edits = name
                .map(BudgetRowEdit::Name)
                .into_iter()
                .chain(first.map(|text| BudgetRowEdit::Amount(Cutoff::First, text)))
                .chain(second.map(|text| BudgetRowEdit::Amount(Cutoff::Second, text)))
                .collect::<Vec<_>>();

            if edits.is_empty() {
                return Err(KinsenasError::Validation(
                    "Nothing to change: pass --name, --first or --second".into(),
                ));
            }

            store.apply_edits(id, edits)?;

            if let Some(row) = store.row(id) {
                println!(
                    "Updated '{}': {} / {}",
                    display_name(row),
                    row.first_cutoff,
                    row.second_cutoff
                );
            }
            println!(
                "Remaining: {} / {}",
                format_amount(symbol, store.remaining_after_first_cutoff()),
                format_amount(symbol, store.remaining_after_second_cutoff())
            );
        }
        BudgetCommands::Cutoff { which, day } => {
            let day = store.set_cutoff_day(which, day)?;
            println!("The {} cutoff is now the {}", which, day.ordinal());
        }
    }

    warn_on_audit_error(store.take_audit_error());
    Ok(())
}

/// Find a row by 1-based position or by ID
fn resolve_row(rows: &[BudgetRow], selector: &str) -> KinsenasResult<BudgetRowId> {
    if let Ok(position) = selector.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|i| rows.get(i))
            .map(|row| row.id)
            .ok_or_else(|| KinsenasError::budget_row_not_found(selector));
    }

    let mut matches = rows.iter().filter(|row| row.id.matches(selector));
    match (matches.next(), matches.next()) {
        (Some(row), None) => Ok(row.id),
        (Some(_), Some(_)) => Err(KinsenasError::Validation(format!(
            "Row ID '{}' is ambiguous",
            selector
        ))),
        (None, _) => Err(KinsenasError::budget_row_not_found(selector)),
    }
}

fn display_name(row: &BudgetRow) -> &str {
    if row.name.is_empty() {
        "(unnamed)"
    } else {
        &row.name
    }
}
