//! Period sequencing, ledger services and the stateful manager that persists them.

pub mod ids;
pub mod ledger_manager;
pub mod period_sequencer;
pub mod services;
pub mod time;

pub use ids::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use ledger_manager::{LedgerManager, LoadMetadata, LoadSource, LoadState};
pub use period_sequencer::next_period;
pub use time::{Clock, FixedClock, SystemClock};
