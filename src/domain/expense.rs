use serde::{Deserialize, Serialize};

use super::common::{lenient_amount, Amounted, Displayable, Identifiable};

/// Label given to the expense every new period is seeded with.
pub const DEFAULT_PERIOD_EXPENSE_LABEL: &str = "Fixed Expense";
/// Label given to expenses added to an existing period.
pub const NEW_EXPENSE_LABEL: &str = "New Expense";

/// One itemized expense inside a budgeting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub label: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
}

impl Expense {
    pub fn new(id: impl Into<String>, label: impl Into<String>, amount: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            amount,
        }
    }
}

impl Identifiable for Expense {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Amounted for Expense {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        self.label.clone()
    }
}

/// Field replacement applied by an expense update.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseField {
    Label(String),
    Amount(f64),
}
