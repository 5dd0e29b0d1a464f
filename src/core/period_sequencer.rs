//! Produces the calendar identity of the next half-month period.

use chrono::NaiveDate;

use crate::domain::{Half, Period, PeriodSlot};

/// Returns the half-month slot that follows `previous`.
///
/// With no previous period the slot containing `today` is returned. Returns `None`
/// when the following slot would fall past the last representable year.
pub fn next_period(previous: Option<&Period>, today: NaiveDate) -> Option<PeriodSlot> {
    let Some(period) = previous else {
        return Some(PeriodSlot::containing(today));
    };
    match period.half {
        Half::FirstHalf => Some(PeriodSlot::new(
            period.year,
            period.month,
            Half::SecondHalf,
        )),
        Half::SecondHalf if period.month >= 11 => period
            .year
            .checked_add(1)
            .map(|year| PeriodSlot::new(year, 0, Half::FirstHalf)),
        Half::SecondHalf => Some(PeriodSlot::new(
            period.year,
            period.month + 1,
            Half::FirstHalf,
        )),
    }
}
