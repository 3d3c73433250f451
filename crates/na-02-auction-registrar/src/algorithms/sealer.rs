//! # Bid Sealing
//!
//! A sealed bid binds the auctioned label, the bidder, the bid value and a
//! secret salt:
//!
//! ```text
//! seal = keccak256(label_hash ‖ bidder (20 bytes) ‖ value (32 bytes, big-endian) ‖ keccak256(salt))
//! ```
//!
//! The deposit sent alongside may exceed the value to hide it (the mask); it
//! is never lower than the value.

use crate::domain::{
    invariant_positive_bid, invariant_salt_present, Address, Amount, AuctionError, BidCommitment,
    BidSalt, Hash,
};
use sha3::{Digest, Keccak256};

/// Compute the seal from its parts.
pub fn seal_hash(label_hash: &Hash, bidder: &Address, value: Amount, salt_digest: &Hash) -> Hash {
    let mut value_bytes = [0u8; 32];
    value.to_big_endian(&mut value_bytes);

    let mut hasher = Keccak256::new();
    hasher.update(label_hash);
    hasher.update(bidder.as_bytes());
    hasher.update(value_bytes);
    hasher.update(salt_digest);
    hasher.finalize().into()
}

/// Deposit to attach: `max(mask, value)`, or exactly `value` without a mask.
pub fn effective_deposit(value: Amount, mask: Option<Amount>) -> Amount {
    match mask {
        Some(mask) => mask.max(value),
        None => value,
    }
}

/// Build the commitment for a bid.
pub fn seal_bid(
    label_hash: &Hash,
    bidder: Address,
    value: Amount,
    mask: Option<Amount>,
    salt: &BidSalt,
) -> Result<BidCommitment, AuctionError> {
    invariant_salt_present(salt)?;
    invariant_positive_bid(value)?;

    Ok(BidCommitment {
        sealed_hash: seal_hash(label_hash, &bidder, value, &salt.digest()),
        bidder,
        deposit: effective_deposit(value, mask),
    })
}
