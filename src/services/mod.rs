//! Service layer for Kinsenas
//!
//! The two state-holders: the recurring budget table and the monthly expense
//! tracker. Each owns its persisted collection and exposes explicit mutation
//! methods plus derived totals.

pub mod budget;
pub mod expenses;

pub use budget::BudgetStore;
pub use expenses::{ExpensesByMonth, ExpensesStore};
