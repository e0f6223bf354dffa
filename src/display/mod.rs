//! Display formatting for terminal output

pub mod budget;
pub mod expenses;

pub use budget::{format_budget, format_budget_rows};
pub use expenses::{format_expense_rows, format_expenses, format_month_list};
