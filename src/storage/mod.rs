//! Persistence of the ledger snapshot as one JSON blob under one key.

pub mod json_backend;
pub mod memory;

use crate::{domain::DebtLedger, errors::PlannerError};

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;

pub type Result<T> = std::result::Result<T, PlannerError>;

/// Key the snapshot is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "debt-tracker-data";

/// Byte store addressed by string keys.
pub trait KeyValueStore: Send + Sync {
    /// Returns the bytes stored under `key`, or `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
}

/// Loads and saves whole ledger snapshots.
pub trait LedgerRepository: Send + Sync {
    /// Returns `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<DebtLedger>>;
    fn save(&self, ledger: &DebtLedger) -> Result<()>;
}

/// Serializes the snapshot as JSON under a single fixed key of a [`KeyValueStore`].
pub struct KeyedRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KeyedRepository<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn with_default_key(store: S) -> Self {
        Self::new(store, DEFAULT_STORAGE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> LedgerRepository for KeyedRepository<S> {
    fn load(&self) -> Result<Option<DebtLedger>> {
        match self.store.get(&self.key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn save(&self, ledger: &DebtLedger) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(ledger)?;
        self.store.set(&self.key, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Expense, Half, Period, PeriodSlot};

    #[test]
    fn missing_key_loads_as_none() {
        let repo = KeyedRepository::with_default_key(MemoryStore::new());
        assert!(repo.load().unwrap().is_none());
    }

    #[test]
    fn saved_snapshot_round_trips_under_the_key() {
        let repo = KeyedRepository::new(MemoryStore::new(), "plan");
        let mut period = Period::new(
            "p1",
            PeriodSlot::new(2025, 6, Half::SecondHalf),
            vec![Expense::new("e1", "Fixed Expense", 0.0)],
        );
        period.income = 1200.0;
        let ledger = DebtLedger {
            initial_debt: Some(5000.0),
            is_debt_set: true,
            periods: vec![period],
        };
        repo.save(&ledger).unwrap();
        assert!(repo.store().get("plan").unwrap().is_some());
        assert_eq!(repo.load().unwrap(), Some(ledger));
    }

    #[test]
    fn malformed_blob_is_a_serde_error() {
        let store = MemoryStore::new();
        store.set(DEFAULT_STORAGE_KEY, b"{not json").unwrap();
        let repo = KeyedRepository::with_default_key(store);
        match repo.load() {
            Err(PlannerError::Serde(_)) => {}
            other => panic!("expected serde error, got {other:?}"),
        }
    }
}
