//! Core data models for Kinsenas
//!
//! Budget rows split across two cutoffs, expense rows grouped by month, and
//! the small value types both rely on.

pub mod amount;
pub mod budget_row;
pub mod cutoff;
pub mod expense_row;
pub mod ids;
pub mod month;

pub use amount::{format_amount, parse_amount};
pub use budget_row::{default_budget_rows, BudgetRow, BudgetRowEdit, SALARY_ROW_NAME};
pub use cutoff::{Cutoff, CutoffDay, CutoffSettings};
pub use expense_row::{default_month_rows, ExpensesRow, ExpensesRowEdit};
pub use ids::{BudgetRowId, ExpenseRowId};
pub use month::{Month, MonthParseError};
