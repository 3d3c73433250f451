//! # Domain Invariants
//!
//! Business rules checked before anything is submitted to the ledger.

use super::entities::BidCommitment;
use super::errors::AuctionError;
use super::secure_salt::BidSalt;
use super::value_objects::Amount;
use na_01_name_hashing::{Name, NamePolicy};

/// Invariant: Salt present.
///
/// An empty salt makes the seal guessable from the bid value alone.
pub fn invariant_salt_present(salt: &BidSalt) -> Result<(), AuctionError> {
    if salt.is_empty() {
        return Err(AuctionError::MissingSalt);
    }
    Ok(())
}

/// Invariant: Bid value is positive.
pub fn invariant_positive_bid(value: Amount) -> Result<(), AuctionError> {
    if value.is_zero() {
        return Err(AuctionError::InvalidBid("bid value must be positive".to_string()));
    }
    Ok(())
}

/// Invariant: Deposit covers the bid.
///
/// Deposit >= bid value, always.
pub fn invariant_deposit_covers_bid(commitment: &BidCommitment, value: Amount) -> Result<(), AuctionError> {
    if commitment.deposit < value {
        return Err(AuctionError::InvalidBid(format!(
            "deposit {} is below bid {}",
            commitment.deposit, value
        )));
    }
    Ok(())
}

/// Invariant: Name is auctioned directly under the registrar suffix.
pub fn invariant_top_level(name: &Name, policy: &NamePolicy) -> Result<(), AuctionError> {
    if !policy.is_top_level(name) {
        return Err(AuctionError::InvalidName {
            name: name.to_string(),
            reason: format!("expected exactly one label under '.{}'", policy.tld),
        });
    }
    Ok(())
}
