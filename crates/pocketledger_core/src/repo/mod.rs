//! Repository layer over the device store.
//!
//! # Responsibility
//! - Define the whole-collection persistence contract used by services.
//! - Keep the storage key and wire codec out of business orchestration.
//!
//! # Invariants
//! - Writes replace the entire stored collection in one `set`.
//! - A missing key reads as the empty collection.

pub mod expense_repo;
