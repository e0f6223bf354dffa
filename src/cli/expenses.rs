//! Expenses CLI commands
//!
//! Every command works on one month: `--month YYYY-MM`, or the current month
//! when omitted.

use clap::Subcommand;

use super::warn_on_audit_error;
use crate::audit::AuditLogger;
use crate::config::{KinsenasPaths, Settings};
use crate::display::{format_expenses, format_month_list};
use crate::error::{KinsenasError, KinsenasResult};
use crate::models::{format_amount, ExpenseRowId, ExpensesRow, ExpensesRowEdit, Month};
use crate::services::ExpensesStore;
use crate::storage::{open_store, JsonFileStore};

/// Expenses subcommands
#[derive(Subcommand)]
pub enum ExpensesCommands {
    /// Show a month's expenses and total
    Show {
        /// Month to show (YYYY-MM)
        #[arg(short, long)]
        month: Option<Month>,
        /// Step back one month from --month (or the current month)
        #[arg(long, conflicts_with = "next")]
        prev: bool,
        /// Step forward one month from --month (or the current month)
        #[arg(long)]
        next: bool,
    },

    /// Append a blank expense row
    AddRow {
        #[arg(short, long)]
        month: Option<Month>,
    },

    /// Remove the month's last row
    RemoveRow {
        #[arg(short, long)]
        month: Option<Month>,
    },

    /// Remove rows by number (1-based)
    Remove {
        /// Row numbers to remove
        #[arg(required = true)]
        rows: Vec<usize>,
        #[arg(short, long)]
        month: Option<Month>,
    },

    /// Edit a row's description or amount
    Edit {
        /// Row number (1-based) or row ID
        row: String,
        /// New description
        #[arg(short, long)]
        name: Option<String>,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        #[arg(short, long)]
        month: Option<Month>,
    },

    /// List months with saved expenses
    Months,
}

/// Open the expenses store on `month` with auditing configured from settings
pub fn open_expenses_store(
    paths: &KinsenasPaths,
    settings: &Settings,
    month: Option<Month>,
) -> KinsenasResult<ExpensesStore<JsonFileStore>> {
    let store = ExpensesStore::load(open_store(paths)?, month.unwrap_or_else(Month::current));
    Ok(if settings.audit_enabled {
        store.with_audit(AuditLogger::new(paths.audit_log()))
    } else {
        store
    })
}

/// Handle an expenses command
pub fn handle_expenses_command(
    paths: &KinsenasPaths,
    settings: &Settings,
    cmd: ExpensesCommands,
) -> KinsenasResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpensesCommands::Show { month, prev, next } => {
            let mut store = open_expenses_store(paths, settings, month)?;
            if prev {
                store.go_to_previous_month();
            } else if next {
                store.go_to_next_month();
            }
            print!("{}", format_expenses(&store, symbol));
        }
        ExpensesCommands::AddRow { month } => {
            let mut store = open_expenses_store(paths, settings, month)?;
            let id = store.add_row()?;
            println!(
                "Added row {} ({}) to {}",
                store.rows().len(),
                id,
                store.selected_month_title()
            );
            warn_on_audit_error(store.take_audit_error());
        }
        ExpensesCommands::RemoveRow { month } => {
            let mut store = open_expenses_store(paths, settings, month)?;
            match store.remove_last_row()? {
                Some(row) => println!("Removed '{}'", display_name(&row)),
                None => println!("No expenses to remove."),
            }
            warn_on_audit_error(store.take_audit_error());
        }
        ExpensesCommands::Remove { rows, month } => {
            let mut store = open_expenses_store(paths, settings, month)?;
            let indices: Vec<usize> = rows.iter().filter_map(|n| n.checked_sub(1)).collect();
            let removed = store.remove_rows(&indices)?;
            if removed.is_empty() {
                println!("No matching rows.");
            }
            for row in &removed {
                println!("Removed '{}'", display_name(row));
            }
            warn_on_audit_error(store.take_audit_error());
        }
        ExpensesCommands::Edit {
            row,
            name,
            amount,
            month,
        } => {
            let mut store = open_expenses_store(paths, settings, month)?;
            let id = resolve_row(store.rows(), &row)?;

            let edits = name
                .map(ExpensesRowEdit::Name)
                .into_iter()
                .chain(amount.map(ExpensesRowEdit::Amount))
                .collect::<Vec<_>>();

            if edits.is_empty() {
                return Err(KinsenasError::Validation(
                    "Nothing to change: pass --name or --amount".into(),
                ));
            }

            store.apply_edits(id, edits)?;
            warn_on_audit_error(store.take_audit_error());

            if let Some(row) = store.row(id) {
                println!("Updated '{}': {}", display_name(row), row.amount);
            }
            println!(
                "Total Expenses {}",
                format_amount(symbol, store.total_expenses())
            );
        }
        ExpensesCommands::Months => {
            let store = open_expenses_store(paths, settings, None)?;
            println!("{}", format_month_list(&store.months()));
        }
    }

    Ok(())
}

/// Find a row by 1-based position or by ID
fn resolve_row(rows: &[ExpensesRow], selector: &str) -> KinsenasResult<ExpenseRowId> {
    if let Ok(position) = selector.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|i| rows.get(i))
            .map(|row| row.id)
            .ok_or_else(|| KinsenasError::expense_row_not_found(selector));
    }

    let mut matches = rows.iter().filter(|row| row.id.matches(selector));
    match (matches.next(), matches.next()) {
        (Some(row), None) => Ok(row.id),
        (Some(_), Some(_)) => Err(KinsenasError::Validation(format!(
            "Row ID '{}' is ambiguous",
            selector
        ))),
        (None, _) => Err(KinsenasError::expense_row_not_found(selector)),
    }
}

fn display_name(row: &ExpensesRow) -> &str {
    if row.name.is_empty() {
        "(unnamed)"
    } else {
        &row.name
    }
}
