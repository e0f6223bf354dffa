//! Monthly expenses display

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{format_amount, ExpensesRow, Month};
use crate::services::ExpensesStore;
use crate::storage::KeyValueStore;

#[derive(Tabled)]
struct ExpenseLine {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Description")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "ID")]
    id: String,
}

pub fn format_expense_rows(rows: &[ExpensesRow]) -> String {
    if rows.is_empty() {
        return "No expenses for this month.".to_string();
    }

    let lines = rows.iter().enumerate().map(|(i, row)| ExpenseLine {
        index: i + 1,
        name: row.name.clone(),
        amount: row.amount.clone(),
        id: row.id.to_string(),
    });

    let mut table = Table::new(lines);
    table.with(Style::psql());
    table.to_string()
}

/// Format the selected month: title, rows and total
pub fn format_expenses<S: KeyValueStore>(store: &ExpensesStore<S>, symbol: &str) -> String {
    format!(
        "{}\n\n{}\n\nTotal Expenses {}\n",
        store.selected_month_title(),
        format_expense_rows(store.rows()),
        format_amount(symbol, store.total_expenses())
    )
}

/// Format the list of months that have stored expenses
pub fn format_month_list(months: &[Month]) -> String {
    if months.is_empty() {
        return "No months with saved expenses.".to_string();
    }

    months
        .iter()
        .map(|m| format!("{}  {}", m.key(), m.title()))
        .collect::<Vec<_>>()
        .join("\n")
}
