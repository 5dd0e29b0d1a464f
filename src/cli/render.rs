//! Plain-text views of the plan: period cards and the progress summary.

use crate::core::services::{DebtSummary, PeriodProjection};
use crate::currency::CurrencyFormatter;
use crate::domain::{Displayable, Period};

pub const DEBT_FREE_BANNER: &str = "Debt Free! 🎉";
pub const PLAN_COMPLETE: &str = "Plan complete.";
pub const PAID_OFF_MARKER: &str = "PAID OFF!";

const LABEL_WIDTH: usize = 18;

fn row(label: &str, value: impl AsRef<str>) -> String {
    format!("  {:<width$}{}", label, value.as_ref(), width = LABEL_WIDTH)
}

/// Title line of the card for the period at `index`.
pub fn period_title(index: usize, period: &Period) -> String {
    format!("Period {} · {}", index + 1, period.display_label())
}

/// Body lines of one period card.
pub fn period_card(
    period: &Period,
    projection: &PeriodProjection,
    formatter: &dyn CurrencyFormatter,
) -> Vec<String> {
    let mut lines = vec![row("Income", formatter.format_amount(period.income))];
    if period.expenses.is_empty() {
        lines.push(row("Expenses", "none"));
    } else {
        lines.push("  Expenses".to_string());
        for (idx, expense) in period.expenses.iter().enumerate() {
            lines.push(format!(
                "    {}. {:<24}{}",
                idx + 1,
                expense.display_label(),
                formatter.format_amount(expense.amount)
            ));
        }
    }
    lines.push(row(
        "Total expenses",
        formatter.format_amount(projection.total_expenses),
    ));
    lines.push(row(
        "Free cash flow",
        formatter.format_amount(projection.free_cash_flow),
    ));
    lines.push(row(
        "Payment to debt",
        formatter.format_amount(period.payment_to_debt),
    ));
    let mut remaining = formatter.format_amount(projection.remaining_debt);
    if projection.paid_off {
        remaining.push_str("  PAID OFF");
    }
    lines.push(row("Remaining debt", remaining));
    lines
}

pub fn summary_lines(summary: &DebtSummary, formatter: &dyn CurrencyFormatter) -> Vec<String> {
    let current = if summary.current_debt <= 0.0 {
        PAID_OFF_MARKER.to_string()
    } else {
        formatter.format_amount(summary.current_debt)
    };
    vec![
        row("Starting debt", formatter.format_amount(summary.initial_debt)),
        row("Total paid", formatter.format_amount(summary.total_paid)),
        row("Current debt", current),
        row("Progress", format!("{}%", summary.progress_percent)),
        row("Periods", summary.period_count.to_string()),
    ]
}
