//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `pocketledger_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use pocketledger_core::db::migrations::latest_version;

fn main() {
    // Tiny probe to validate core crate wiring independently from the
    // Flutter/FFI runtime setup.
    println!("pocketledger_core ping={}", pocketledger_core::ping());
    println!(
        "pocketledger_core version={}",
        pocketledger_core::core_version()
    );
    println!("pocketledger_core store_schema_version={}", latest_version());
}
