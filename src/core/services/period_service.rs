use chrono::NaiveDate;
use tracing::debug;

use crate::core::ids::IdGenerator;
use crate::core::period_sequencer::next_period;
use crate::domain::{
    is_valid_amount, DebtLedger, Expense, Period, PeriodField, DEFAULT_PERIOD_EXPENSE_LABEL,
};

pub struct PeriodService;

impl PeriodService {
    /// Appends the period following the last one (or containing `today` when empty),
    /// seeded with a single zero-amount fixed expense. A ledger whose last period ends
    /// the representable calendar is returned unchanged.
    pub fn add(ledger: &DebtLedger, today: NaiveDate, ids: &dyn IdGenerator) -> DebtLedger {
        let Some(slot) = next_period(ledger.last_period(), today) else {
            debug!("no period follows the last representable year");
            return ledger.clone();
        };
        let period_id = ids.next_id();
        let seed = Expense::new(ids.next_id(), DEFAULT_PERIOD_EXPENSE_LABEL, 0.0);
        debug!(period = %period_id, label = %slot.date_label, "adding period");

        let mut periods = ledger.periods.clone();
        periods.push(Period::new(period_id, slot, vec![seed]));
        DebtLedger {
            periods,
            ..ledger.clone()
        }
    }

    /// Replaces one field of the period with `id`.
    pub fn update(ledger: &DebtLedger, id: &str, field: PeriodField) -> DebtLedger {
        let valid = match &field {
            PeriodField::Income(value) | PeriodField::PaymentToDebt(value) => {
                is_valid_amount(*value)
            }
            PeriodField::DateLabel(_) => true,
            PeriodField::Expenses(expenses) => expenses
                .iter()
                .all(|expense| is_valid_amount(expense.amount)),
        };
        if !valid {
            debug!(period = %id, ?field, "rejecting invalid amount");
            return ledger.clone();
        }

        let periods = ledger
            .periods
            .iter()
            .map(|period| {
                if period.id != id {
                    return period.clone();
                }
                let mut updated = period.clone();
                match &field {
                    PeriodField::Income(value) => updated.income = *value,
                    PeriodField::PaymentToDebt(value) => updated.payment_to_debt = *value,
                    PeriodField::DateLabel(label) => updated.date_label = label.clone(),
                    PeriodField::Expenses(expenses) => updated.expenses = expenses.clone(),
                }
                updated
            })
            .collect();
        DebtLedger {
            periods,
            ..ledger.clone()
        }
    }

    /// Drops the period with `id`. Remaining periods keep their positions and labels.
    pub fn remove(ledger: &DebtLedger, id: &str) -> DebtLedger {
        let periods = ledger
            .periods
            .iter()
            .filter(|period| period.id != id)
            .cloned()
            .collect();
        DebtLedger {
            periods,
            ..ledger.clone()
        }
    }
}
