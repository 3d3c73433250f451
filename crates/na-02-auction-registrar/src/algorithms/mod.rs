//! # Algorithms Module
//!
//! Pure auction logic: state derivation, sealing, reveal accounting,
//! finalization and invalidation checks.

pub mod finalizer;
pub mod invalidator;
pub mod revealer;
pub mod sealer;
pub mod state_resolver;

pub use finalizer::{check_finishable, close_deed, settlement_price, winner_of};
pub use invalidator::{check_invalidatable, InvalidationTarget};
pub use revealer::{apply_reveal, open_commitment, reveal_bid};
pub use sealer::{effective_deposit, seal_bid, seal_hash};
pub use state_resolver::{resolve_state, resolve_subdomain_state};
