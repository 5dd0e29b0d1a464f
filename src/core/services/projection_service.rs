use crate::domain::{total_amount, DebtLedger, Period};

/// Figures shown on the summary cards.
#[derive(Debug, Clone, PartialEq)]
pub struct DebtSummary {
    pub initial_debt: f64,
    pub total_paid: f64,
    pub current_debt: f64,
    pub progress_percent: u8,
    pub period_count: usize,
    pub plan_complete: bool,
}

/// Figures shown on one period card.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodProjection {
    pub total_expenses: f64,
    pub free_cash_flow: f64,
    pub remaining_debt: f64,
    pub paid_off: bool,
}

/// Derived, never-stored views over a ledger snapshot.
pub struct ProjectionService;

impl ProjectionService {
    pub fn total_expenses(period: &Period) -> f64 {
        total_amount(&period.expenses)
    }

    /// Income minus total expenses; negative when the period overspends.
    pub fn free_cash_flow(period: &Period) -> f64 {
        period.income - Self::total_expenses(period)
    }

    /// Starting debt minus payments of periods `0..=index`, by position.
    ///
    /// Returns `None` when `index` is out of range.
    pub fn remaining_debt(ledger: &DebtLedger, index: usize) -> Option<f64> {
        let paid: f64 = ledger
            .periods
            .get(..=index)?
            .iter()
            .map(|period| period.payment_to_debt)
            .sum();
        Some(ledger.debt_amount() - paid)
    }

    pub fn is_paid_off(ledger: &DebtLedger, index: usize) -> Option<bool> {
        Self::remaining_debt(ledger, index).map(|remaining| remaining <= 0.0)
    }

    /// Sum of payments across every period.
    pub fn total_paid(ledger: &DebtLedger) -> f64 {
        ledger
            .periods
            .iter()
            .map(|period| period.payment_to_debt)
            .sum()
    }

    pub fn current_debt(ledger: &DebtLedger) -> f64 {
        ledger.debt_amount() - Self::total_paid(ledger)
    }

    /// Share of the starting debt paid so far, rounded and clamped to `0..=100`.
    pub fn progress_percent(ledger: &DebtLedger) -> u8 {
        if !ledger.has_valid_debt() {
            return 0;
        }
        let ratio = Self::total_paid(ledger) / ledger.debt_amount() * 100.0;
        ratio.round().clamp(0.0, 100.0) as u8
    }

    /// True once there is at least one period and the last one brings the debt to zero or below.
    pub fn is_plan_complete(ledger: &DebtLedger) -> bool {
        ledger
            .periods
            .len()
            .checked_sub(1)
            .and_then(|last| Self::is_paid_off(ledger, last))
            .unwrap_or(false)
    }

    /// Whether another period should be offered.
    pub fn can_add_period(ledger: &DebtLedger) -> bool {
        !Self::is_plan_complete(ledger)
    }

    pub fn summary(ledger: &DebtLedger) -> DebtSummary {
        DebtSummary {
            initial_debt: ledger.debt_amount(),
            total_paid: Self::total_paid(ledger),
            current_debt: Self::current_debt(ledger),
            progress_percent: Self::progress_percent(ledger),
            period_count: ledger.periods.len(),
            plan_complete: Self::is_plan_complete(ledger),
        }
    }

    pub fn period_view(ledger: &DebtLedger, index: usize) -> Option<PeriodProjection> {
        let period = ledger.periods.get(index)?;
        let remaining_debt = Self::remaining_debt(ledger, index)?;
        Some(PeriodProjection {
            total_expenses: Self::total_expenses(period),
            free_cash_flow: Self::free_cash_flow(period),
            remaining_debt,
            paid_off: remaining_debt <= 0.0,
        })
    }
}
