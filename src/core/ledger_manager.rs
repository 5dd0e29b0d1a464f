use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::core::ids::{IdGenerator, UuidIdGenerator};
use crate::core::services::{
    DebtSummary, ExpenseService, LedgerService, PeriodProjection, PeriodService, ProjectionService,
};
use crate::core::time::{Clock, SystemClock};
use crate::domain::{ledger_warnings, DebtLedger, ExpenseField, PeriodField};
use crate::errors::PlannerError;
use crate::storage::LedgerRepository;

/// Whether persisted state has been read yet.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready(DebtLedger),
}

/// Where the active snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Stored,
    /// Nothing stored yet.
    Empty,
    /// Stored data could not be read or decoded.
    Recovered,
    /// `load` already ran; the in-memory snapshot was kept.
    AlreadyLoaded,
}

/// Metadata describing the outcome of a load operation.
#[derive(Debug, Clone)]
pub struct LoadMetadata {
    pub source: LoadSource,
    pub warnings: Vec<String>,
}

/// Facade that owns the ledger snapshot and writes it back after every mutation.
pub struct LedgerManager {
    state: LoadState,
    repository: Box<dyn LedgerRepository>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl LedgerManager {
    pub fn new(repository: Box<dyn LedgerRepository>) -> Self {
        Self::with_collaborators(repository, Arc::new(SystemClock), Arc::new(UuidIdGenerator))
    }

    pub fn with_collaborators(
        repository: Box<dyn LedgerRepository>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            state: LoadState::Loading,
            repository,
            clock,
            ids,
        }
    }

    /// Reads persisted state once. Read or decode failures fall back to an empty ledger.
    ///
    /// Calling this again after the first load is a no-op.
    pub fn load(&mut self) -> LoadMetadata {
        if self.is_loaded() {
            return LoadMetadata {
                source: LoadSource::AlreadyLoaded,
                warnings: Vec::new(),
            };
        }

        let (ledger, source) = match self.repository.load() {
            Ok(Some(ledger)) => (ledger, LoadSource::Stored),
            Ok(None) => {
                info!("no saved ledger found; starting empty");
                (DebtLedger::new(), LoadSource::Empty)
            }
            Err(err) => {
                warn!(error = %err, "failed to read saved ledger; starting empty");
                (DebtLedger::new(), LoadSource::Recovered)
            }
        };

        let warnings = ledger_warnings(&ledger);
        for warning in &warnings {
            warn!(%warning, "saved ledger anomaly");
        }
        let ledger = repair(ledger);
        info!(periods = ledger.periods.len(), is_debt_set = ledger.is_debt_set, "ledger loaded");
        self.state = LoadState::Ready(ledger);
        LoadMetadata { source, warnings }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, LoadState::Ready(_))
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// The current snapshot, or `None` while loading.
    pub fn ledger(&self) -> Option<&DebtLedger> {
        match &self.state {
            LoadState::Ready(ledger) => Some(ledger),
            LoadState::Loading => None,
        }
    }

    pub fn set_initial_debt(&mut self, value: Option<f64>) -> Result<&DebtLedger, PlannerError> {
        self.apply("set_initial_debt", |ledger, _| {
            LedgerService::set_initial_debt(ledger, value)
        })
    }

    pub fn confirm_debt(&mut self) -> Result<&DebtLedger, PlannerError> {
        self.apply("confirm_debt", |ledger, _| LedgerService::confirm_debt(ledger))
    }

    pub fn add_period(&mut self) -> Result<&DebtLedger, PlannerError> {
        let today = self.clock.today();
        self.apply("add_period", |ledger, ids| PeriodService::add(ledger, today, ids))
    }

    pub fn update_period(
        &mut self,
        id: &str,
        field: PeriodField,
    ) -> Result<&DebtLedger, PlannerError> {
        self.apply("update_period", |ledger, _| {
            PeriodService::update(ledger, id, field)
        })
    }

    pub fn remove_period(&mut self, id: &str) -> Result<&DebtLedger, PlannerError> {
        self.apply("remove_period", |ledger, _| PeriodService::remove(ledger, id))
    }

    pub fn add_expense(&mut self, period_id: &str) -> Result<&DebtLedger, PlannerError> {
        self.apply("add_expense", |ledger, ids| {
            ExpenseService::add(ledger, period_id, ids)
        })
    }

    pub fn update_expense(
        &mut self,
        period_id: &str,
        expense_id: &str,
        field: ExpenseField,
    ) -> Result<&DebtLedger, PlannerError> {
        self.apply("update_expense", |ledger, _| {
            ExpenseService::update(ledger, period_id, expense_id, field)
        })
    }

    pub fn remove_expense(
        &mut self,
        period_id: &str,
        expense_id: &str,
    ) -> Result<&DebtLedger, PlannerError> {
        self.apply("remove_expense", |ledger, _| {
            ExpenseService::remove(ledger, period_id, expense_id)
        })
    }

    /// Discards the debt and every period. Callers confirm with the user first.
    pub fn reset_all(&mut self) -> Result<&DebtLedger, PlannerError> {
        self.apply("reset_all", |_, _| LedgerService::reset())
    }

    pub fn summary(&self) -> Option<DebtSummary> {
        self.ledger().map(ProjectionService::summary)
    }

    pub fn period_view(&self, index: usize) -> Option<PeriodProjection> {
        self.ledger()
            .and_then(|ledger| ProjectionService::period_view(ledger, index))
    }

    pub fn remaining_debt(&self, index: usize) -> Option<f64> {
        self.ledger()
            .and_then(|ledger| ProjectionService::remaining_debt(ledger, index))
    }

    pub fn is_plan_complete(&self) -> bool {
        self.ledger()
            .map(ProjectionService::is_plan_complete)
            .unwrap_or(false)
    }

    pub fn can_add_period(&self) -> bool {
        self.ledger()
            .map(ProjectionService::can_add_period)
            .unwrap_or(false)
    }

    fn apply<F>(&mut self, operation: &str, mutate: F) -> Result<&DebtLedger, PlannerError>
    where
        F: FnOnce(&DebtLedger, &dyn IdGenerator) -> DebtLedger,
    {
        let current = match &self.state {
            LoadState::Ready(ledger) => ledger,
            LoadState::Loading => {
                debug!(operation, "mutation refused while loading");
                return Err(PlannerError::NotLoaded);
            }
        };
        let next = mutate(current, self.ids.as_ref());
        debug!(operation, changed = next != *current, "ledger mutation applied");
        self.persist(&next);
        self.state = LoadState::Ready(next);
        self.ledger().ok_or(PlannerError::NotLoaded)
    }

    fn persist(&self, ledger: &DebtLedger) {
        if let Err(err) = self.repository.save(ledger) {
            error!(error = %err, "failed to save ledger; continuing in memory");
        }
    }
}

/// Clears `is_debt_set` when the stored debt is not positive.
fn repair(mut ledger: DebtLedger) -> DebtLedger {
    if ledger.is_debt_set && !ledger.has_valid_debt() {
        ledger.is_debt_set = false;
    }
    for period in &mut ledger.periods {
        zero_if_unreadable(&mut period.income);
        zero_if_unreadable(&mut period.payment_to_debt);
        for expense in &mut period.expenses {
            zero_if_unreadable(&mut expense.amount);
        }
    }
    ledger
}

fn zero_if_unreadable(amount: &mut f64) {
    if !amount.is_finite() {
        *amount = 0.0;
    }
}
