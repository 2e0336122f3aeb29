//! Core domain logic for the pocketledger expense tracker.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::expense::{
    next_expense_id, parse_amount, AmountParseError, Expense, ExpenseId, ExpenseInput,
    ExpenseValidationError,
};
pub use repo::expense_repo::{
    ExpenseRepository, JsonExpenseRepository, RepoError, RepoResult, EXPENSES_KEY,
};
pub use service::entry_service::{AddOutcome, DeleteOutcome, EntryError, EntryService};
pub use service::view_service::{ViewFilter, ViewService};
pub use service::LoadState;
pub use store::kv_store::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
