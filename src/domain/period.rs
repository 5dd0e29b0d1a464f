//! Half-month budgeting periods and their calendar identity.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::common::{lenient_amount, Displayable, Identifiable};
use super::expense::Expense;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Last day of month that still belongs to the first half.
pub const FIRST_HALF_LAST_DAY: u32 = 15;

/// Which half of a calendar month a period covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Half {
    /// Days 1 through 15.
    FirstHalf,
    /// Day 16 through the last day of the month.
    SecondHalf,
}

impl Half {
    /// Half containing the given day of month.
    pub fn for_day(day: u32) -> Self {
        if day <= FIRST_HALF_LAST_DAY {
            Half::FirstHalf
        } else {
            Half::SecondHalf
        }
    }

    fn index(self) -> i64 {
        match self {
            Half::FirstHalf => 0,
            Half::SecondHalf => 1,
        }
    }
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Half::FirstHalf => "first-half",
            Half::SecondHalf => "second-half",
        };
        f.write_str(label)
    }
}

/// Calendar identity of a half-month period: year, zero-based month and half.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodSlot {
    pub year: i32,
    /// Zero-based month, 0 = January.
    pub month: u32,
    pub half: Half,
    pub date_label: String,
}

impl PeriodSlot {
    pub fn new(year: i32, month: u32, half: Half) -> Self {
        Self {
            year,
            month,
            half,
            date_label: date_label(year, month, half),
        }
    }

    /// Slot containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month0(), Half::for_day(date.day()))
    }

    /// Linear half-month index; consecutive slots differ by exactly one.
    pub fn ordinal(&self) -> i64 {
        ordinal(self.year, self.month, self.half)
    }
}

/// One half-month budgeting period in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub id: String,
    pub date_label: String,
    pub year: i32,
    pub month: u32,
    #[serde(rename = "periodType")]
    pub half: Half,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub income: f64,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub payment_to_debt: f64,
}

impl Period {
    /// Creates a period for `slot` with zero income, zero payment and the given expenses.
    pub fn new(id: impl Into<String>, slot: PeriodSlot, expenses: Vec<Expense>) -> Self {
        Self {
            id: id.into(),
            date_label: slot.date_label,
            year: slot.year,
            month: slot.month,
            half: slot.half,
            income: 0.0,
            expenses,
            payment_to_debt: 0.0,
        }
    }

    pub fn ordinal(&self) -> i64 {
        ordinal(self.year, self.month, self.half)
    }
}

impl Identifiable for Period {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for Period {
    fn display_label(&self) -> String {
        self.date_label.clone()
    }
}

/// Field replacement applied by a period update.
///
/// Calendar fields (year, month, half) are fixed at creation so the sequence stays ordered.
#[derive(Debug, Clone, PartialEq)]
pub enum PeriodField {
    Income(f64),
    PaymentToDebt(f64),
    DateLabel(String),
    Expenses(Vec<Expense>),
}

/// Renders `"01-15 Mon YYYY"` or `"16-<last day> Mon YYYY"`.
pub fn date_label(year: i32, month: u32, half: Half) -> String {
    let name = month_abbreviation(month);
    match half {
        Half::FirstHalf => format!("01-{:02} {} {}", FIRST_HALF_LAST_DAY, name, year),
        Half::SecondHalf => format!(
            "{}-{} {} {}",
            FIRST_HALF_LAST_DAY + 1,
            days_in_month(year, month),
            name,
            year
        ),
    }
}

/// Abbreviated English month name for a zero-based month.
pub fn month_abbreviation(month: u32) -> &'static str {
    MONTH_ABBREVIATIONS[(month % 12) as usize]
}

/// Number of days in the zero-based `month` of `year`, leap years included.
///
/// Uses proleptic Gregorian rules, so it holds for any `i32` year.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month % 12 {
        1 if is_leap_year(year) => 29,
        1 => 28,
        3 | 5 | 8 | 10 => 30,
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Whether `year` lies inside the calendar range `NaiveDate` can represent.
pub fn is_supported_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 1, 1).is_some()
}

fn ordinal(year: i32, month: u32, half: Half) -> i64 {
    i64::from(year) * 24 + i64::from(month) * 2 + half.index()
}
