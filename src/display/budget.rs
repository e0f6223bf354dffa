//! Budget table display
//!
//! Renders the cutoff table with ordinal cutoff headers, followed by column
//! totals and the balance left after each cutoff.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{format_amount, BudgetRow, Cutoff, CutoffSettings};
use crate::services::BudgetStore;
use crate::storage::KeyValueStore;

#[derive(Tabled)]
struct BudgetLine {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "First")]
    first: String,
    #[tabled(rename = "Second")]
    second: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Format the rows of a budget table
pub fn format_budget_rows(rows: &[BudgetRow], cutoffs: CutoffSettings) -> String {
    if rows.is_empty() {
        return "No budget rows.".to_string();
    }

    let lines = rows.iter().enumerate().map(|(i, row)| BudgetLine {
        index: i + 1,
        name: row.name.clone(),
        first: row.first_cutoff.clone(),
        second: row.second_cutoff.clone(),
        id: row.id.to_string(),
    });

    let mut table = Table::new(lines);
    table.with(Style::psql());

    format!(
        "Cut-off: {} / {}\n{}",
        cutoffs.first.ordinal(),
        cutoffs.second.ordinal(),
        table
    )
}

/// Format the full budget view: rows, totals and remaining balances
pub fn format_budget<S: KeyValueStore>(store: &BudgetStore<S>, symbol: &str) -> String {
    let cutoffs = store.cutoffs();
    let mut output = format_budget_rows(store.rows(), cutoffs);
    output.push_str("\n\n");

    for which in Cutoff::all() {
        output.push_str(&format!(
            "Remaining after the {:<5} {:>12}\n",
            cutoffs.get(which).ordinal(),
            format_amount(symbol, store.remaining_after(which))
        ));
    }

    output.push_str(&format!(
        "Monthly total               {:>12}\n",
        format_amount(symbol, store.monthly_total_value())
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_default_budget_view() {
        let store = BudgetStore::load(MemoryStore::new());
        let output = format_budget(&store, "₱");

        assert!(output.contains("Cut-off: 15th / 30th"));
        assert!(output.contains("Housing Loan"));
        assert!(output.contains("1157"));
        assert!(output.contains("Remaining after the 15th"));
        assert!(output.contains("₱5843"));
        assert!(output.contains("₱6843"));
        assert!(output.contains("₱93314"));
    }

    #[test]
    fn test_empty_rows() {
        assert_eq!(
            format_budget_rows(&[], CutoffSettings::default()),
            "No budget rows."
        );
    }

    #[test]
    fn test_raw_text_is_shown() {
        let rows = vec![BudgetRow::new("Salary", "26k", "")];
        let output = format_budget_rows(&rows, CutoffSettings::default());
        assert!(output.contains("26k"));
    }
}
