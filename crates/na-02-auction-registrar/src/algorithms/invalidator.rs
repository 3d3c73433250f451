//! # Invalidation
//!
//! Names whose auctioned label is shorter than the policy minimum can still
//! be won. Anyone may reclaim them once they are won or owned.

use crate::domain::{AuctionError, NameState};
use na_01_name_hashing::{Name, NameError, NamePolicy};

/// What an accepted invalidation will reclaim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidationTarget {
    /// The offending label, in clear (the ledger re-checks its length).
    pub label: String,
    /// Characters in the label.
    pub label_length: usize,
    /// State before invalidation.
    pub previous_state: NameState,
}

/// Check that `name` may be invalidated in `state`.
///
/// Requires Won or Owned, and the name must actually violate the length rule.
pub fn check_invalidatable(
    name: &Name,
    state: NameState,
    policy: &NamePolicy,
) -> Result<InvalidationTarget, AuctionError> {
    if !state.has_winner() {
        return Err(AuctionError::precondition(
            name.as_str(),
            state,
            "name must be Won or Owned to invalidate",
        ));
    }

    match policy.validate(name.as_str()) {
        Ok(()) => Err(AuctionError::precondition(
            name.as_str(),
            state,
            "name satisfies the minimum label length",
        )),
        Err(NameError::LabelTooShort { label, actual, .. }) => Ok(InvalidationTarget {
            label,
            label_length: actual,
            previous_state: state,
        }),
        Err(other) => Err(other.into()),
    }
}
