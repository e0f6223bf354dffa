//! Variable expense rows tracked per month

use serde::{Deserialize, Serialize};

use super::amount::parse_amount;
use super::ids::ExpenseRowId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpensesRow {
    pub id: ExpenseRowId,
    pub name: String,
    pub amount: String,
}

impl ExpensesRow {
    pub fn new(name: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            id: ExpenseRowId::new(),
            name: name.into(),
            amount: amount.into(),
        }
    }

    pub fn blank() -> Self {
        Self::new("", "")
    }

    /// Parsed amount (0 when the text is not a number)
    pub fn amount_value(&self) -> f64 {
        parse_amount(&self.amount)
    }
}

/// A single-field change to an expense row
#[derive(Debug, Clone, PartialEq)]
pub enum ExpensesRowEdit {
    Name(String),
    Amount(String),
}

impl ExpensesRowEdit {
    pub(crate) fn apply(self, row: &mut ExpensesRow) {
        match self {
            ExpensesRowEdit::Name(name) => row.name = name,
            ExpensesRowEdit::Amount(amount) => row.amount = amount,
        }
    }
}

/// Rows shown for a month that has never been edited
pub fn default_month_rows() -> Vec<ExpensesRow> {
    vec![
        ExpensesRow::new("Food", ""),
        ExpensesRow::new("Transportation", ""),
    ]
}
