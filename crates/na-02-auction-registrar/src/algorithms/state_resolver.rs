//! # Name State Resolution
//!
//! Maps raw ledger facts to a lifecycle state. Nothing is cached: the state is
//! recomputed from the entry, the registry owner and the current time on
//! every call, because the ledger only stores the registration date and the
//! bidding/reveal split is implied by it.
//!
//! ```text
//! Available ──bid──► Bidding ──(reg - reveal)──► Revealing ──(reg)──► Won ──finish──► Owned
//!                                                    │                   │                │
//!                                                    └──no reveals──► Available     invalidate ──► Invalid
//! ```

use crate::domain::{Address, AuctionEntry, AuctionTimeline, LedgerStatus, NameState};

/// Derive the state of a top-level name.
///
/// `registry_owner` is the owner recorded for the name's namehash; it
/// separates a won auction that was never finished from an owned name.
pub fn resolve_state(
    now: u64,
    entry: &AuctionEntry,
    registry_owner: Address,
    reveal_period_secs: u64,
) -> NameState {
    match entry.status {
        LedgerStatus::Open => NameState::Available,
        LedgerStatus::Auction | LedgerStatus::Reveal => {
            let timeline = AuctionTimeline::new(entry.registration_date, reveal_period_secs);
            if timeline.is_bidding(now) {
                NameState::Bidding
            } else if timeline.is_revealing(now) {
                NameState::Revealing
            } else if entry.has_revealed_bid() {
                won_or_owned(registry_owner)
            } else {
                NameState::Available
            }
        }
        LedgerStatus::Owned => won_or_owned(registry_owner),
        LedgerStatus::Forbidden => NameState::Forbidden,
        LedgerStatus::NotYetAvailable => NameState::NotYetAvailable,
        LedgerStatus::Invalidated => NameState::Invalid,
    }
}

/// Derive the state of a subdomain: there is no auction, only an owner.
pub fn resolve_subdomain_state(owner: Address) -> NameState {
    if owner.is_zero() {
        NameState::Available
    } else {
        NameState::Owned
    }
}

fn won_or_owned(registry_owner: Address) -> NameState {
    if registry_owner.is_zero() {
        NameState::Won
    } else {
        NameState::Owned
    }
}
