//! CLI command handlers
//!
//! Bridges clap argument parsing with the two stores.

pub mod budget;
pub mod expenses;

pub use budget::{handle_budget_command, BudgetCommands};
pub use expenses::{handle_expenses_command, ExpensesCommands};

use crate::audit::AuditLogger;
use crate::config::KinsenasPaths;
use crate::error::{KinsenasError, KinsenasResult};

/// Tell the user a saved change is missing from the audit log
pub(crate) fn warn_on_audit_error(error: Option<KinsenasError>) {
    if let Some(e) = error {
        eprintln!(
            "Warning: the change was saved, but the audit log could not be written: {}",
            e
        );
    }
}

/// Print the most recent audit entries
pub fn handle_history_command(paths: &KinsenasPaths, count: usize) -> KinsenasResult<()> {
    let entries = AuditLogger::new(paths.audit_log()).read_recent(count)?;

    if entries.is_empty() {
        println!("No changes recorded yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
