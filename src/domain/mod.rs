//! Pure domain models: the debt ledger, its half-month periods and their expenses.
//! No I/O and no clocks; only data types and calendar arithmetic.

pub mod common;
pub mod expense;
pub mod ledger;
pub mod period;

pub use common::{
    is_positive_amount, is_valid_amount, total_amount, Amounted, Displayable, Identifiable,
};
pub use expense::{Expense, ExpenseField, DEFAULT_PERIOD_EXPENSE_LABEL, NEW_EXPENSE_LABEL};
pub use ledger::{ledger_warnings, DebtLedger};
pub use period::{
    date_label, days_in_month, is_supported_year, Half, Period, PeriodField, PeriodSlot,
};
