use tracing::debug;

use crate::domain::{is_positive_amount, DebtLedger};

pub struct LedgerService;

impl LedgerService {
    /// Replaces the starting debt without confirming it.
    ///
    /// Non-finite input counts as unset. Once the debt is confirmed only positive
    /// values are accepted.
    pub fn set_initial_debt(ledger: &DebtLedger, value: Option<f64>) -> DebtLedger {
        let value = value.filter(|amount| amount.is_finite());
        if ledger.is_debt_set && !value.is_some_and(is_positive_amount) {
            debug!(?value, "ignoring non-positive debt edit on a confirmed ledger");
            return ledger.clone();
        }
        DebtLedger {
            initial_debt: value,
            ..ledger.clone()
        }
    }

    /// Marks the debt as set when the starting debt is positive; otherwise a no-op.
    pub fn confirm_debt(ledger: &DebtLedger) -> DebtLedger {
        if !ledger.has_valid_debt() {
            debug!("starting debt is not positive; confirmation skipped");
            return ledger.clone();
        }
        DebtLedger {
            is_debt_set: true,
            ..ledger.clone()
        }
    }

    /// Returns the empty, unset ledger.
    pub fn reset() -> DebtLedger {
        DebtLedger::new()
    }
}
