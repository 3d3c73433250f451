//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits for the auction registrar.

mod clock;
mod in_memory_ledger;

pub use clock::{ManualClock, SystemClock};
pub use in_memory_ledger::InMemoryLedger;
