use std::sync::Arc;

use chrono::NaiveDate;
use debt_planner::{
    core::{FixedClock, LedgerManager, SequentialIdGenerator},
    currency::{CurrencyFormatter, WholeCurrencyFormatter},
    init,
    storage::{KeyedRepository, MemoryStore},
};

#[test]
fn planner_smoke() {
    init();

    let mut manager = LedgerManager::with_collaborators(
        Box::new(KeyedRepository::with_default_key(MemoryStore::new())),
        Arc::new(FixedClock(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())),
        Arc::new(SequentialIdGenerator::new("smoke")),
    );
    manager.load();
    manager.set_initial_debt(Some(4200.0)).unwrap();
    manager.confirm_debt().unwrap();
    manager.add_period().unwrap();

    let summary = manager.summary().unwrap();
    assert_eq!(summary.period_count, 1);
    assert_eq!(summary.progress_percent, 0);
    assert_eq!(
        WholeCurrencyFormatter::default().format_amount(summary.current_debt),
        "$4,200"
    );
}
