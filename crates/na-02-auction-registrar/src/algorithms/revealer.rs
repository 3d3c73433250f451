//! # Bid Reveal
//!
//! Opening a commitment and the ledger's accounting for an opened bid.
//!
//! Accounting for a matching reveal of value `v` with deposit `d`, where the
//! entry's `value` is the running second price:
//!
//! | Case | Entry update | Refund to bidder |
//! |------|--------------|------------------|
//! | `v < min_price` | none | `d` |
//! | `v > highest_bid` | `value ← highest_bid`, `highest_bid ← v`, deed → bidder | `d - v` |
//! | `v > value` | `value ← v` | `d` |
//! | otherwise | none | `d` |

use super::sealer::seal_hash;
use crate::domain::{
    invariant_deposit_covers_bid, invariant_salt_present, Address, Amount, AuctionEntry,
    AuctionError, Bid, BidCommitment, BidSalt, Hash, LockedValue, RevealSettlement, RevealedBid,
};

/// Check `(value, salt)` against a recorded commitment.
///
/// Fails with `Mismatch` if the recomputed seal differs; the ledger keeps the
/// deposit in that case.
pub fn open_commitment(
    commitment: &BidCommitment,
    label_hash: &Hash,
    value: Amount,
    salt: &BidSalt,
) -> Result<RevealedBid, AuctionError> {
    invariant_salt_present(salt)?;

    let salt_digest = salt.digest();
    let recomputed = seal_hash(label_hash, &commitment.bidder, value, &salt_digest);
    if recomputed != commitment.sealed_hash {
        return Err(AuctionError::Mismatch {
            sealed_hash: hex::encode(recomputed),
        });
    }
    invariant_deposit_covers_bid(commitment, value)?;

    Ok(RevealedBid::new(commitment.clone(), *label_hash, value, salt_digest))
}

/// Move a bid from sealed to revealed.
pub fn reveal_bid(bid: Bid, label_hash: &Hash, value: Amount, salt: &BidSalt) -> Result<Bid, AuctionError> {
    match bid {
        Bid::Sealed(commitment) => {
            open_commitment(&commitment, label_hash, value, salt).map(Bid::Revealed)
        }
        Bid::Revealed(_) => Err(AuctionError::InvalidBid("bid already revealed".to_string())),
    }
}

/// Apply a matching reveal to the auction entry.
///
/// `new_deed` is the deed the ledger issues if this bid takes the lead.
pub fn apply_reveal(
    entry: &mut AuctionEntry,
    value: Amount,
    deposit: Amount,
    new_deed: Address,
    min_price: Amount,
) -> RevealSettlement {
    if value < min_price {
        return RevealSettlement::BelowMinimum { refund: deposit };
    }

    if value > entry.highest_bid {
        let displaced = (!entry.deed.is_zero()).then_some(entry.deed);
        entry.value = LockedValue::from_raw(entry.highest_bid);
        entry.highest_bid = value;
        entry.deed = new_deed;
        return RevealSettlement::NewLeader {
            refund: deposit.saturating_sub(value),
            displaced,
        };
    }

    if value > entry.value.raw() {
        entry.value = LockedValue::Explicit(value);
        return RevealSettlement::RunnerUp { refund: deposit };
    }

    RevealSettlement::Outbid { refund: deposit }
}
