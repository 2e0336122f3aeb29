//! Expense collection repository.
//!
//! # Responsibility
//! - Own the single device-store key and the JSON wire codec for the
//!   collection.
//! - Keep load/replace semantics whole-collection, never per-record.
//!
//! # Invariants
//! - The stored value is always the exact image of the last successful
//!   `replace_all`.
//! - A missing key decodes as the empty collection, never an error.
//! - Decode failure is reported as an error; it must not crash the caller.

use crate::model::expense::Expense;
use crate::store::kv_store::{KeyValueStore, StoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed device-store key holding the serialized expense collection.
pub const EXPENSES_KEY: &str = "expenses";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for expense collection persistence.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    Decode(serde_json::Error),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "invalid stored expense data: {err}"),
            Self::Encode(err) => write!(f, "failed to encode expense collection: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Decode(err) | Self::Encode(err) => Some(err),
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Whole-collection persistence contract for expense records.
///
/// Injected into both screen services so storage can be faked in tests.
pub trait ExpenseRepository {
    /// Loads the full collection; absent key means empty.
    ///
    /// Two calls without an intervening `replace_all` return identical
    /// collections.
    fn load_all(&self) -> RepoResult<Vec<Expense>>;

    /// Replaces the stored collection with `expenses` in a single write.
    fn replace_all(&self, expenses: &[Expense]) -> RepoResult<()>;
}

/// JSON-blob repository over any device key-value store.
pub struct JsonExpenseRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> JsonExpenseRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> ExpenseRepository for JsonExpenseRepository<S> {
    fn load_all(&self) -> RepoResult<Vec<Expense>> {
        match self.store.get(EXPENSES_KEY)? {
            Some(json) => serde_json::from_str(&json).map_err(RepoError::Decode),
            None => Ok(Vec::new()),
        }
    }

    fn replace_all(&self, expenses: &[Expense]) -> RepoResult<()> {
        let json = serde_json::to_string(expenses).map_err(RepoError::Encode)?;
        self.store.set(EXPENSES_KEY, &json)?;
        Ok(())
    }
}
