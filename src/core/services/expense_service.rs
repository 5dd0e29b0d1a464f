use tracing::debug;

use crate::core::ids::IdGenerator;
use crate::domain::{is_valid_amount, DebtLedger, Expense, ExpenseField, Period, NEW_EXPENSE_LABEL};

pub struct ExpenseService;

impl ExpenseService {
    /// Appends a zero-amount "New Expense" to the period with `period_id`.
    pub fn add(ledger: &DebtLedger, period_id: &str, ids: &dyn IdGenerator) -> DebtLedger {
        if ledger.period(period_id).is_none() {
            debug!(period = %period_id, "add expense: unknown period");
            return ledger.clone();
        }
        let expense = Expense::new(ids.next_id(), NEW_EXPENSE_LABEL, 0.0);
        map_period(ledger, period_id, |period| {
            period.expenses.push(expense.clone());
        })
    }

    /// Replaces one field of the matching expense inside the matching period.
    pub fn update(
        ledger: &DebtLedger,
        period_id: &str,
        expense_id: &str,
        field: ExpenseField,
    ) -> DebtLedger {
        if let ExpenseField::Amount(value) = &field {
            if !is_valid_amount(*value) {
                debug!(period = %period_id, expense = %expense_id, value, "rejecting invalid amount");
                return ledger.clone();
            }
        }
        map_period(ledger, period_id, |period| {
            for expense in period.expenses.iter_mut().filter(|e| e.id == expense_id) {
                match &field {
                    ExpenseField::Label(label) => expense.label = label.clone(),
                    ExpenseField::Amount(value) => expense.amount = *value,
                }
            }
        })
    }

    /// Drops the matching expense; a period may be left with none.
    pub fn remove(ledger: &DebtLedger, period_id: &str, expense_id: &str) -> DebtLedger {
        map_period(ledger, period_id, |period| {
            period.expenses.retain(|expense| expense.id != expense_id);
        })
    }
}

fn map_period(ledger: &DebtLedger, period_id: &str, edit: impl Fn(&mut Period)) -> DebtLedger {
    let periods = ledger
        .periods
        .iter()
        .map(|period| {
            let mut next = period.clone();
            if next.id == period_id {
                edit(&mut next);
            }
            next
        })
        .collect();
    DebtLedger {
        periods,
        ..ledger.clone()
    }
}
