//! Domain model for the expense tracker core.
//!
//! # Responsibility
//! - Define the canonical expense record stored on device.
//! - Keep entry-time validation rules in one place.
//!
//! # Invariants
//! - Every record is identified by a stable `ExpenseId`.
//! - Deletion is physical removal from the collection; there are no
//!   tombstones and no update-in-place.

pub mod expense;
