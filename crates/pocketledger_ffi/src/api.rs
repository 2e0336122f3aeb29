//! FFI use-case API for the mobile screens.
//!
//! # Responsibility
//! - Expose stable, screen-level functions to the UI via FRB.
//! - Keep error semantics simple: envelopes with ok/message, never panics.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Validation failures surface as user-facing messages; storage faults
//!   stay in the diagnostic log and only degrade the response.

use pocketledger_core::db::open_db;
use pocketledger_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    EntryError, EntryService, Expense, ExpenseInput, JsonExpenseRepository, SqliteKeyValueStore,
    ViewFilter, ViewService,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const DB_FILE_NAME: &str = "pocketledger.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Route names understood by the router on the UI side.
const SCREEN_SPLASH: &str = "SplashScreen";
const SCREEN_ADD: &str = "AddExpenses";
const SPLASH_DURATION_MS: u32 = 5000;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same configuration (idempotent).
/// - Never panics; returns empty string on success and an error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Splash screen contract for the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplashConfig {
    /// Route the navigator starts on.
    pub initial_screen: String,
    /// Route the splash replaces itself with.
    pub next_screen: String,
    /// Time the splash stays up before the replace, in milliseconds.
    pub duration_ms: u32,
}

/// Returns the splash routing contract.
///
/// # FFI contract
/// - Sync call, constant data; the timer and the navigation itself live on
///   the UI side.
#[flutter_rust_bridge::frb(sync)]
pub fn splash_config() -> SplashConfig {
    SplashConfig {
        initial_screen: SCREEN_SPLASH.to_string(),
        next_screen: SCREEN_ADD.to_string(),
        duration_ms: SPLASH_DURATION_MS,
    }
}

/// One expense row as rendered by either list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub date: String,
    /// May be non-finite for legacy records; totals already coerce it.
    pub amount: f64,
}

/// Hydrated state for the add-expenses screen.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryOverviewResponse {
    pub items: Vec<ExpenseView>,
    /// Running total with non-numeric amounts counted as zero.
    pub total: f64,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// Action response envelope for the add-expenses screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryActionResponse {
    /// Whether the operation changed the working set.
    pub ok: bool,
    /// Id of the created record, on successful add.
    pub expense_id: Option<String>,
    /// Whether the fire-and-forget save reached the device store.
    pub persisted: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl EntryActionResponse {
    fn rejected(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            expense_id: None,
            persisted: false,
            message: message.into(),
        }
    }
}

/// Hydrated state for the view-expenses screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewResponse {
    pub items: Vec<ExpenseView>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// Hydrates the add screen: current working set plus running total.
///
/// # FFI contract
/// - Sync call, device-store-backed execution.
/// - Never panics; a store fault yields an empty overview with the fault
///   message.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_overview() -> EntryOverviewResponse {
    match with_entry_service(|service| {
        let items = service
            .expenses()
            .iter()
            .map(to_expense_view)
            .collect::<Vec<_>>();
        (items, service.total())
    }) {
        Ok((items, total)) => {
            let message = if items.is_empty() {
                "No expenses recorded.".to_string()
            } else {
                format!("{} expense(s).", items.len())
            };
            EntryOverviewResponse {
                items,
                total,
                message,
            }
        }
        Err(message) => EntryOverviewResponse {
            items: Vec::new(),
            total: 0.0,
            message,
        },
    }
}

/// Adds an expense from the four raw form fields.
///
/// # FFI contract
/// - Sync call, device-store-backed execution.
/// - Validation rejections map to the user-facing alert message; no record
///   is created for them.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_add_expense(
    name: String,
    category: String,
    date: String,
    amount: String,
) -> EntryActionResponse {
    let input = ExpenseInput {
        name,
        category,
        date,
        amount,
    };
    match with_entry_service(|service| service.add_expense(&input)) {
        Ok(Ok(outcome)) => {
            let message = if outcome.persisted {
                "Expense added."
            } else {
                "Expense added; saving to device storage failed."
            };
            EntryActionResponse {
                ok: true,
                expense_id: Some(outcome.id),
                persisted: outcome.persisted,
                message: message.to_string(),
            }
        }
        Ok(Err(err)) => EntryActionResponse::rejected(user_message(&err)),
        Err(message) => EntryActionResponse::rejected(message),
    }
}

/// Deletes an expense by its stable id.
///
/// # FFI contract
/// - Sync call, device-store-backed execution.
/// - Deleting an unknown id reports `ok = false`; the store write still
///   fires with the unchanged snapshot.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_delete_expense(id: String) -> EntryActionResponse {
    match with_entry_service(|service| service.delete_expense(&id)) {
        Ok(outcome) => {
            let message = if outcome.removed {
                "Expense deleted."
            } else {
                "No expense with that id."
            };
            EntryActionResponse {
                ok: outcome.removed,
                expense_id: None,
                persisted: outcome.persisted,
                message: message.to_string(),
            }
        }
        Err(message) => EntryActionResponse::rejected(message),
    }
}

/// Hydrates the view screen, optionally filtered to the current calendar
/// month.
///
/// # FFI contract
/// - Sync call, device-store-backed execution.
/// - Never panics; a store fault yields an empty listing with the fault
///   message.
#[flutter_rust_bridge::frb(sync)]
pub fn view_expenses(current_month_only: bool) -> ViewResponse {
    let filter = if current_month_only {
        ViewFilter::current_month()
    } else {
        ViewFilter::All
    };

    let conn = match open_db(resolve_db_path()) {
        Ok(conn) => conn,
        Err(err) => {
            return ViewResponse {
                items: Vec::new(),
                message: format!("view_expenses failed: {err}"),
            };
        }
    };
    let store = match SqliteKeyValueStore::try_new(&conn) {
        Ok(store) => store,
        Err(err) => {
            return ViewResponse {
                items: Vec::new(),
                message: format!("view_expenses failed: {err}"),
            };
        }
    };

    let mut service = ViewService::new(JsonExpenseRepository::new(store));
    service.refresh(&filter);

    let items: Vec<ExpenseView> = service.expenses().iter().map(to_expense_view).collect();
    let message = if items.is_empty() {
        if current_month_only {
            "No expenses added this month.".to_string()
        } else {
            "No expenses recorded.".to_string()
        }
    } else {
        format!("Found {} expense(s).", items.len())
    };
    ViewResponse { items, message }
}

fn user_message(err: &EntryError) -> String {
    match err {
        EntryError::Validation(_) => "Please fill all fields".to_string(),
        EntryError::Amount(_) => "Please enter a valid amount".to_string(),
    }
}

fn to_expense_view(expense: &Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id.clone(),
        name: expense.name.clone(),
        category: expense.category.clone(),
        date: expense.date.clone(),
        amount: expense.amount,
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("POCKETLEDGER_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_entry_service<T>(
    f: impl FnOnce(&mut EntryService<JsonExpenseRepository<SqliteKeyValueStore<'_>>>) -> T,
) -> Result<T, String> {
    let conn = open_db(resolve_db_path()).map_err(|err| format!("device store open failed: {err}"))?;
    let store = SqliteKeyValueStore::try_new(&conn)
        .map_err(|err| format!("device store init failed: {err}"))?;
    let mut service = EntryService::new(JsonExpenseRepository::new(store));
    service.hydrate();
    Ok(f(&mut service))
}
