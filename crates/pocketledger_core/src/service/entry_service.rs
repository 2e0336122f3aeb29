//! Entry-screen use-case service: the sole writer of the expense
//! collection.
//!
//! # Responsibility
//! - Own the authoritative in-memory working set for the entry screen.
//! - Re-serialize and persist the full collection after every mutation.
//!
//! # Invariants
//! - In-memory mutation always precedes the store write, so a later write
//!   carries the cumulative snapshot even when an earlier one is slow.
//! - Store faults are logged and absorbed; the working set is the fallback
//!   of record for the session.

use crate::model::expense::{
    parse_amount, AmountParseError, Expense, ExpenseId, ExpenseInput, ExpenseValidationError,
};
use crate::repo::expense_repo::ExpenseRepository;
use crate::service::LoadState;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection reasons for `add_expense`.
///
/// For any of these no record is created and no write occurs; the FFI
/// layer maps them to the user-facing validation message.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryError {
    Validation(ExpenseValidationError),
    Amount(AmountParseError),
}

impl Display for EntryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Amount(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EntryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Amount(err) => Some(err),
        }
    }
}

impl From<ExpenseValidationError> for EntryError {
    fn from(value: ExpenseValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<AmountParseError> for EntryError {
    fn from(value: AmountParseError) -> Self {
        Self::Amount(value)
    }
}

/// Outcome of a successful add.
///
/// The record is in the working set either way; `persisted` reports
/// whether the fire-and-forget write reached the device store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    pub id: ExpenseId,
    pub persisted: bool,
}

/// Outcome of a delete request.
///
/// `removed` is false for an unknown id; the store write fires either way
/// with the current snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub removed: bool,
    pub persisted: bool,
}

/// Working-set service behind the add-expenses screen.
pub struct EntryService<R: ExpenseRepository> {
    repo: R,
    expenses: Vec<Expense>,
    state: LoadState,
}

impl<R: ExpenseRepository> EntryService<R> {
    /// Creates a service with an empty, unloaded working set.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            expenses: Vec::new(),
            state: LoadState::Unloaded,
        }
    }

    /// Replaces the working set wholesale from the device store.
    ///
    /// On failure the working set is left empty and the fault is logged;
    /// the screen renders from the empty list.
    pub fn hydrate(&mut self) {
        self.state = LoadState::Loading;
        match self.repo.load_all() {
            Ok(expenses) => {
                info!(
                    "event=hydrate module=entry status=ok count={}",
                    expenses.len()
                );
                self.expenses = expenses;
                self.state = LoadState::Loaded;
            }
            Err(err) => {
                error!("event=hydrate module=entry status=error error={err}");
                self.expenses = Vec::new();
                self.state = LoadState::LoadFailed;
            }
        }
    }

    /// Validates input, appends a fresh record, persists the full list.
    ///
    /// The empty-field check runs on the raw text with no trimming; amount
    /// text must parse as a non-negative decimal before a record exists.
    /// Persistence is fire-and-forget: a failed save leaves the in-memory
    /// append in place and is reported through `AddOutcome::persisted`.
    pub fn add_expense(&mut self, input: &ExpenseInput) -> Result<AddOutcome, EntryError> {
        input.validate()?;
        let amount = parse_amount(&input.amount)?;

        let expense = Expense::new(
            input.name.clone(),
            input.category.clone(),
            input.date.clone(),
            amount,
        );
        let id = expense.id.clone();
        self.expenses.push(expense);

        let persisted = self.persist("expense_add");
        info!("event=expense_add module=entry status=ok id={id} persisted={persisted}");
        Ok(AddOutcome { id, persisted })
    }

    /// Removes the record with the matching id, if any.
    ///
    /// A miss leaves the collection unchanged, but the write still fires
    /// with the unchanged snapshot.
    pub fn delete_expense(&mut self, id: &str) -> DeleteOutcome {
        let removed = match self.expenses.iter().position(|expense| expense.id == id) {
            Some(index) => {
                self.expenses.remove(index);
                true
            }
            None => false,
        };

        let persisted = self.persist("expense_delete");
        info!(
            "event=expense_delete module=entry status=ok id={id} removed={removed} persisted={persisted}"
        );
        DeleteOutcome { removed, persisted }
    }

    /// Running total over the working set.
    ///
    /// Non-finite stored amounts count as zero without being corrected at
    /// the source.
    pub fn total(&self) -> f64 {
        self.expenses.iter().map(Expense::countable_amount).sum()
    }

    /// Current working set, insertion order.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    fn persist(&self, operation: &str) -> bool {
        match self.repo.replace_all(&self.expenses) {
            Ok(()) => true,
            Err(err) => {
                error!("event={operation} module=entry status=save_failed error={err}");
                false
            }
        }
    }
}
