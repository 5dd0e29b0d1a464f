//! Snapshot-in, snapshot-out operations on [`DebtLedger`](crate::domain::DebtLedger).
//!
//! Every mutation borrows the current ledger and returns the next one. Calls that
//! address an unknown id, or carry an unusable amount, return an unchanged copy.

pub mod expense_service;
pub mod ledger_service;
pub mod period_service;
pub mod projection_service;

pub use expense_service::ExpenseService;
pub use ledger_service::LedgerService;
pub use period_service::PeriodService;
pub use projection_service::{DebtSummary, PeriodProjection, ProjectionService};
