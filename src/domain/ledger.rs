use serde::{Deserialize, Serialize};

use super::common::{is_positive_amount, Identifiable};
use super::period::{is_supported_year, Period};

/// The single debt being paid down and the periods planned against it.
///
/// Values of this type are snapshots: services derive a new ledger from an old
/// one instead of editing it in place.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtLedger {
    #[serde(default, with = "initial_debt_format")]
    pub initial_debt: Option<f64>,
    #[serde(default)]
    pub is_debt_set: bool,
    #[serde(default)]
    pub periods: Vec<Period>,
}

impl DebtLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting debt usable in arithmetic; unset counts as zero.
    pub fn debt_amount(&self) -> f64 {
        self.initial_debt.unwrap_or(0.0)
    }

    /// Whether the starting debt is a positive number and may be confirmed.
    pub fn has_valid_debt(&self) -> bool {
        self.initial_debt.is_some_and(is_positive_amount)
    }

    pub fn period(&self, id: &str) -> Option<&Period> {
        self.periods.iter().find(|period| period.id() == id)
    }

    pub fn last_period(&self) -> Option<&Period> {
        self.periods.last()
    }
}

/// Collects anomalies in a loaded snapshot without altering it.
pub fn ledger_warnings(ledger: &DebtLedger) -> Vec<String> {
    let mut warnings = Vec::new();

    if ledger.is_debt_set && !ledger.has_valid_debt() {
        warnings.push("ledger marked as set without a positive starting debt".to_string());
    }

    for period in &ledger.periods {
        if period.month > 11 {
            warnings.push(format!(
                "period {} has out-of-range month {}",
                period.id, period.month
            ));
        }
        if !is_supported_year(period.year) {
            warnings.push(format!(
                "period {} has out-of-range year {}",
                period.id, period.year
            ));
        }
        if period.income < 0.0 || !period.income.is_finite() {
            warnings.push(format!("period {} has invalid income", period.id));
        }
        if period.payment_to_debt < 0.0 || !period.payment_to_debt.is_finite() {
            warnings.push(format!("period {} has invalid debt payment", period.id));
        }
        for expense in &period.expenses {
            if expense.amount < 0.0 || !expense.amount.is_finite() {
                warnings.push(format!(
                    "expense {} in period {} has invalid amount",
                    expense.id, period.id
                ));
            }
        }
    }

    for pair in ledger.periods.windows(2) {
        if pair[1].ordinal() != pair[0].ordinal() + 1 {
            warnings.push(format!(
                "period {} does not directly follow {}",
                pair[1].date_label, pair[0].date_label
            ));
        }
    }

    warnings
}

/// Serializes an unset debt as `""` and accepts `""`, `null`, numbers or numeric text on load.
mod initial_debt_format {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDebt {
        Amount(f64),
        Text(String),
    }

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(amount) => serializer.serialize_f64(*amount),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawDebt>::deserialize(deserializer)?;
        let amount = match raw {
            Some(RawDebt::Amount(amount)) => Some(amount),
            Some(RawDebt::Text(text)) => text.trim().parse::<f64>().ok(),
            None => None,
        };
        Ok(amount.filter(|value| value.is_finite()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Expense, Half, PeriodSlot};

    fn period(id: &str, year: i32, month: u32, half: Half) -> Period {
        Period::new(
            id,
            PeriodSlot::new(year, month, half),
            vec![Expense::new(format!("{id}-e"), "Fixed Expense", 0.0)],
        )
    }

    #[test]
    fn unset_debt_serializes_as_empty_string() {
        let json = serde_json::to_value(DebtLedger::new()).unwrap();
        assert_eq!(json["initialDebt"], "");
        assert_eq!(json["isDebtSet"], false);
        assert!(json["periods"].as_array().unwrap().is_empty());
    }

    #[test]
    fn loads_legacy_snapshot_shape() {
        let raw = r#"{
            "initialDebt": 1500,
            "isDebtSet": true,
            "periods": [{
                "id": "p1",
                "dateLabel": "01-15 Mar 2025",
                "year": 2025,
                "month": 2,
                "periodType": "first-half",
                "income": 900,
                "expenses": [{ "id": "e1", "label": "Rent", "amount": 400 }],
                "paymentToDebt": 250
            }]
        }"#;
        let ledger: DebtLedger = serde_json::from_str(raw).unwrap();
        assert_eq!(ledger.initial_debt, Some(1500.0));
        assert!(ledger.is_debt_set);
        assert_eq!(ledger.periods[0].half, Half::FirstHalf);
        assert_eq!(ledger.periods[0].expenses[0].label, "Rent");
        assert_eq!(ledger.periods[0].payment_to_debt, 250.0);
    }

    #[test]
    fn unset_debt_variants_load_as_none() {
        for raw in [
            r#"{"initialDebt":"","isDebtSet":false,"periods":[]}"#,
            r#"{"initialDebt":null,"isDebtSet":false,"periods":[]}"#,
            r#"{"isDebtSet":false,"periods":[]}"#,
            r#"{"initialDebt":"abc","isDebtSet":false,"periods":[]}"#,
        ] {
            let ledger: DebtLedger = serde_json::from_str(raw).unwrap();
            assert_eq!(ledger.initial_debt, None, "input: {raw}");
        }
        let numeric: DebtLedger =
            serde_json::from_str(r#"{"initialDebt":" 42.5 ","periods":[]}"#).unwrap();
        assert_eq!(numeric.initial_debt, Some(42.5));
    }

    #[test]
    fn snapshot_round_trip_preserves_order_and_values() {
        let mut ledger = DebtLedger {
            initial_debt: Some(1000.0),
            is_debt_set: true,
            periods: vec![
                period("a", 2025, 11, Half::SecondHalf),
                period("b", 2026, 0, Half::FirstHalf),
            ],
        };
        ledger.periods[1].expenses.push(Expense::new("x", "Groceries", 120.5));
        let json = serde_json::to_string(&ledger).unwrap();
        let restored: DebtLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, ledger);
    }

    #[test]
    fn warnings_flag_gaps_and_inconsistent_flag() {
        let ledger = DebtLedger {
            initial_debt: None,
            is_debt_set: true,
            periods: vec![
                period("a", 2025, 0, Half::FirstHalf),
                period("c", 2025, 1, Half::FirstHalf),
            ],
        };
        let warnings = ledger_warnings(&ledger);
        assert_eq!(warnings.len(), 2, "unexpected warnings: {warnings:?}");
        assert!(warnings[0].contains("positive starting debt"));
        assert!(warnings[1].contains("does not directly follow"));
    }

    #[test]
    fn contiguous_ledger_has_no_warnings() {
        let ledger = DebtLedger {
            initial_debt: Some(10.0),
            is_debt_set: true,
            periods: vec![
                period("a", 2025, 11, Half::FirstHalf),
                period("b", 2025, 11, Half::SecondHalf),
                period("c", 2026, 0, Half::FirstHalf),
            ],
        };
        assert!(ledger_warnings(&ledger).is_empty());
    }

    #[test]
    fn warnings_flag_years_beyond_the_calendar() {
        let ledger = DebtLedger {
            initial_debt: Some(10.0),
            is_debt_set: true,
            periods: vec![period("far", i32::MAX, 11, Half::SecondHalf)],
        };
        let warnings = ledger_warnings(&ledger);
        assert_eq!(warnings.len(), 1, "unexpected warnings: {warnings:?}");
        assert!(warnings[0].contains("out-of-range year"));
    }

    #[test]
    fn null_amounts_load_and_are_flagged() {
        let raw = r#"{
            "initialDebt": 500,
            "isDebtSet": true,
            "periods": [{
                "id": "p1", "dateLabel": "01-15 Jan 2025", "year": 2025, "month": 0,
                "periodType": "first-half", "income": null, "paymentToDebt": 50,
                "expenses": [{"id": "e1", "label": "Rent", "amount": null}]
            }]
        }"#;
        let ledger: DebtLedger = serde_json::from_str(raw).unwrap();
        assert_eq!(ledger.periods.len(), 1);
        let warnings = ledger_warnings(&ledger);
        assert!(warnings.iter().any(|w| w.contains("p1 has invalid income")));
        assert!(warnings.iter().any(|w| w.contains("expense e1")));
    }
}
