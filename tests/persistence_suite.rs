mod common;

use std::fs;

use common::{manager_in, setup_test_env, temp_base};
use debt_planner::{
    core::LoadSource,
    domain::{DebtLedger, PeriodField},
    storage::{JsonFileStore, KeyValueStore, KeyedRepository, LedgerRepository},
};

#[test]
fn ledger_survives_a_restart() {
    let (mut manager, base) = setup_test_env();
    manager.set_initial_debt(Some(2500.0)).unwrap();
    manager.confirm_debt().unwrap();
    let period_id = manager.add_period().unwrap().periods[0].id.clone();
    manager
        .update_period(&period_id, PeriodField::Income(1200.0))
        .unwrap();
    let expected = manager.ledger().unwrap().clone();

    let mut reopened = manager_in(&base);
    assert_eq!(reopened.load().source, LoadSource::Stored);
    assert_eq!(reopened.ledger(), Some(&expected));
}

#[test]
fn snapshot_is_written_under_the_storage_key() {
    let (mut manager, base) = setup_test_env();
    manager.set_initial_debt(Some(10.0)).unwrap();

    let path = base.join("data").join("debt-tracker-data.json");
    let json = fs::read_to_string(&path).unwrap();
    assert!(json.contains("\"initialDebt\": 10"));
    assert!(json.contains("\"isDebtSet\": false"));
    assert!(!base.join("data").join("debt-tracker-data.json.tmp").exists());
}

#[test]
fn legacy_snapshot_loads() {
    let base = temp_base();
    let store = JsonFileStore::new(base.join("data")).unwrap();
    store
        .set(
            "debt-tracker-data",
            br#"{
                "initialDebt": 1000,
                "isDebtSet": true,
                "periods": [{
                    "id": "1700000000000",
                    "dateLabel": "01-15 Jan 2025",
                    "year": 2025,
                    "month": 0,
                    "periodType": "first-half",
                    "income": 500,
                    "expenses": [{ "id": "1700000000001", "label": "Rent", "amount": 100 }],
                    "paymentToDebt": 200
                }]
            }"#,
        )
        .unwrap();

    let mut manager = manager_in(&base);
    let meta = manager.load();
    assert_eq!(meta.source, LoadSource::Stored);
    assert!(meta.warnings.is_empty());
    assert_eq!(manager.remaining_debt(0), Some(800.0));

    let next = manager.add_period().unwrap().periods[1].clone();
    assert_eq!(next.date_label, "16-31 Jan 2025");
}

#[test]
fn null_amount_keeps_periods_through_the_next_save() {
    let base = temp_base();
    let store = JsonFileStore::new(base.join("data")).unwrap();
    store
        .set(
            "debt-tracker-data",
            br#"{
                "initialDebt": 1000,
                "isDebtSet": true,
                "periods": [{
                    "id": "p1",
                    "dateLabel": "01-15 Jan 2025",
                    "year": 2025,
                    "month": 0,
                    "periodType": "first-half",
                    "income": null,
                    "expenses": [{ "id": "e1", "label": "Rent", "amount": 100 }],
                    "paymentToDebt": 200
                }]
            }"#,
        )
        .unwrap();

    let mut manager = manager_in(&base);
    let meta = manager.load();
    assert_eq!(meta.source, LoadSource::Stored);
    assert_eq!(meta.warnings.len(), 1);
    manager.set_initial_debt(Some(1200.0)).unwrap();

    let mut reopened = manager_in(&base);
    assert!(reopened.load().warnings.is_empty());
    let ledger = reopened.ledger().unwrap();
    assert_eq!(ledger.periods.len(), 1);
    assert_eq!(ledger.periods[0].income, 0.0);
    assert_eq!(ledger.periods[0].payment_to_debt, 200.0);
}

#[test]
fn corrupt_file_falls_back_to_empty_ledger() {
    let base = temp_base();
    let data = base.join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("debt-tracker-data.json"), "{ not json").unwrap();

    let mut manager = manager_in(&base);
    assert_eq!(manager.load().source, LoadSource::Recovered);
    assert_eq!(manager.ledger(), Some(&DebtLedger::new()));

    manager.set_initial_debt(Some(75.0)).unwrap();
    let repository = KeyedRepository::with_default_key(JsonFileStore::new(data).unwrap());
    let stored = repository.load().unwrap().unwrap();
    assert_eq!(stored.initial_debt, Some(75.0));
}

#[test]
fn empty_string_debt_round_trips() {
    let (mut manager, base) = setup_test_env();
    manager.set_initial_debt(None).unwrap();
    let json = fs::read_to_string(base.join("data").join("debt-tracker-data.json")).unwrap();
    assert!(json.contains("\"initialDebt\": \"\""));

    let mut reopened = manager_in(&base);
    reopened.load();
    assert_eq!(reopened.ledger().unwrap().initial_debt, None);
}
