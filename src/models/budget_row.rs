//! Recurring budget rows
//!
//! One line of the cutoff table: a name and the amount due on each cutoff.

use serde::{Deserialize, Serialize};

use super::amount::parse_amount;
use super::cutoff::Cutoff;
use super::ids::BudgetRowId;

/// Name given to the first row of a freshly seeded table
pub const SALARY_ROW_NAME: &str = "Salary";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRow {
    pub id: BudgetRowId,
    pub name: String,
    pub first_cutoff: String,
    pub second_cutoff: String,
}

impl BudgetRow {
    pub fn new(
        name: impl Into<String>,
        first_cutoff: impl Into<String>,
        second_cutoff: impl Into<String>,
    ) -> Self {
        Self {
            id: BudgetRowId::new(),
            name: name.into(),
            first_cutoff: first_cutoff.into(),
            second_cutoff: second_cutoff.into(),
        }
    }

    /// A row with every field left blank
    pub fn blank() -> Self {
        Self::new("", "", "")
    }

    /// Raw text for one cutoff
    pub fn cutoff_text(&self, which: Cutoff) -> &str {
        match which {
            Cutoff::First => &self.first_cutoff,
            Cutoff::Second => &self.second_cutoff,
        }
    }

    /// Parsed amount for one cutoff (0 when the text is not a number)
    pub fn cutoff_value(&self, which: Cutoff) -> f64 {
        parse_amount(self.cutoff_text(which))
    }

    /// Both cutoffs added together
    pub fn monthly_value(&self) -> f64 {
        self.cutoff_value(Cutoff::First) + self.cutoff_value(Cutoff::Second)
    }
}

/// A single-field change to a budget row
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetRowEdit {
    Name(String),
    Amount(Cutoff, String),
}

impl BudgetRowEdit {
    pub(crate) fn apply(self, row: &mut BudgetRow) {
        match self {
            BudgetRowEdit::Name(name) => row.name = name,
            BudgetRowEdit::Amount(Cutoff::First, text) => row.first_cutoff = text,
            BudgetRowEdit::Amount(Cutoff::Second, text) => row.second_cutoff = text,
        }
    }
}

/// The table seeded on first launch
pub fn default_budget_rows() -> Vec<BudgetRow> {
    vec![
        BudgetRow::new(SALARY_ROW_NAME, "26000", "27000"),
        BudgetRow::new("Housing Loan", "6000", "6000"),
        BudgetRow::new("Autoloan", "8000", "8000"),
        BudgetRow::new("HMO", "1157", "1157"),
        BudgetRow::new("Savings", "5000", "5000"),
    ]
}
