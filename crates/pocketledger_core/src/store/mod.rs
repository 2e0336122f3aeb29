//! Device key-value store boundary.
//!
//! # Responsibility
//! - Model the platform storage engine as a string-keyed get/set contract.
//! - Provide the SQLite-backed production store and an in-memory fake.
//!
//! # Invariants
//! - `set` replaces the whole value for a key; there are no partial writes.
//! - Store failures are reported to the caller, never panicked on.

pub mod kv_store;
