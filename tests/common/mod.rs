#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc, sync::Mutex};

use chrono::NaiveDate;
use debt_planner::{
    core::{FixedClock, LedgerManager, SequentialIdGenerator},
    storage::{JsonFileStore, KeyedRepository},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 4).expect("valid date")
}

/// Manager over JSON files in `base`, with a pinned clock and predictable ids.
pub fn manager_in(base: &PathBuf) -> LedgerManager {
    let store = JsonFileStore::new(base.join("data")).expect("create json store");
    LedgerManager::with_collaborators(
        Box::new(KeyedRepository::with_default_key(store)),
        Arc::new(FixedClock(today())),
        Arc::new(SequentialIdGenerator::new("id")),
    )
}

/// Creates an isolated, loaded manager backed by a unique directory.
pub fn setup_test_env() -> (LedgerManager, PathBuf) {
    let base = temp_base();
    let mut manager = manager_in(&base);
    manager.load();
    (manager, base)
}
