//! Listing-screen read model.
//!
//! # Responsibility
//! - Present a read-only snapshot of the persisted collection.
//! - Apply the caller-selected display filter at refresh time.
//!
//! # Invariants
//! - No mutation operations exist on this service.
//! - The "no records" display is purely `len() == 0`.

use crate::model::expense::Expense;
use crate::repo::expense_repo::ExpenseRepository;
use crate::service::LoadState;
use chrono::{Datelike, Local, NaiveDate};
use log::{error, info};

/// Display filter for the listing screen.
///
/// Month filtering is selected by the caller instead of being baked into
/// the load path, so "this month" and "all time" views share one refresh
/// implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewFilter {
    All,
    Month { year: i32, month: u32 },
}

impl ViewFilter {
    /// Month filter for the local calendar month at the moment of the
    /// call.
    pub fn current_month() -> Self {
        let today = Local::now().date_naive();
        Self::Month {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Whether a record belongs to this view.
    ///
    /// Records whose date does not parse cannot belong to any month and
    /// are only retained by `All`.
    pub fn matches(&self, expense: &Expense) -> bool {
        match self {
            Self::All => true,
            Self::Month { year, month } => match parse_record_date(&expense.date) {
                Some(date) => date.year() == *year && date.month() == *month,
                None => false,
            },
        }
    }
}

/// Parses the stored `YYYY-MM-DD` text; tolerant of unpadded components.
fn parse_record_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Read-only service behind the view-expenses screen.
pub struct ViewService<R: ExpenseRepository> {
    repo: R,
    expenses: Vec<Expense>,
    state: LoadState,
}

impl<R: ExpenseRepository> ViewService<R> {
    /// Creates a service with an empty, unloaded snapshot.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            expenses: Vec::new(),
            state: LoadState::Unloaded,
        }
    }

    /// Loads the persisted collection and applies the display filter.
    ///
    /// On failure the snapshot is left empty and the fault is logged; the
    /// screen renders the empty state.
    pub fn refresh(&mut self, filter: &ViewFilter) {
        self.state = LoadState::Loading;
        match self.repo.load_all() {
            Ok(all) => {
                let expenses: Vec<Expense> = all
                    .into_iter()
                    .filter(|expense| filter.matches(expense))
                    .collect();
                info!(
                    "event=refresh module=view status=ok filter={filter:?} count={}",
                    expenses.len()
                );
                self.expenses = expenses;
                self.state = LoadState::Loaded;
            }
            Err(err) => {
                error!("event=refresh module=view status=error error={err}");
                self.expenses = Vec::new();
                self.state = LoadState::LoadFailed;
            }
        }
    }

    /// Current snapshot, insertion order.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Drives the "no records" display.
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }
}
