//! Screen-facing use-case services.
//!
//! # Responsibility
//! - Orchestrate hydration and mutation flows for the two data screens.
//! - Keep storage faults inside the diagnostic log, never user-fatal.
//!
//! # Invariants
//! - Each service owns an independent snapshot; nothing is shared between
//!   screens except the device store itself.
//! - `EntryService` is the sole writer; `ViewService` never mutates.

pub mod entry_service;
pub mod view_service;

/// Hydration lifecycle for a screen-bound service.
///
/// `Loaded` is re-entered on every remount; `LoadFailed` degrades to an
/// empty snapshot instead of blocking rendering. Saves have no visible
/// state of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No load attempted since construction.
    Unloaded,
    /// A load is in flight.
    Loading,
    /// Snapshot reflects the last successful load.
    Loaded,
    /// Last load failed; snapshot is empty.
    LoadFailed,
}
