//! # Auction Finalization
//!
//! The highest revealed bid wins and pays the second-highest revealed bid,
//! or the registrar minimum if it was the only one.

use crate::domain::{Address, Amount, AuctionEntry, AuctionError, Deed, NameState};

/// Price the winner pays.
pub fn settlement_price(entry: &AuctionEntry, min_price: Amount) -> Amount {
    entry.value.resolve(min_price)
}

/// Finish is allowed only for a won auction whose registry owner is unset.
pub fn check_finishable(name: &str, state: NameState, registry_owner: Address) -> Result<(), AuctionError> {
    if state != NameState::Won {
        return Err(AuctionError::precondition(name, state, "auction must be won to finish"));
    }
    if !registry_owner.is_zero() {
        return Err(AuctionError::precondition(name, state, "auction already finished"));
    }
    Ok(())
}

/// Owner of the winning deed.
pub fn winner_of(name: &str, state: NameState, deed: Option<&Deed>) -> Result<Address, AuctionError> {
    match deed {
        Some(deed) if !deed.owner.is_zero() => Ok(deed.owner),
        _ => Err(AuctionError::precondition(name, state, "no deed recorded for the winning bid")),
    }
}

/// Reduce the deed to the settlement price. Returns the excess released to
/// the owner.
pub fn close_deed(deed: &mut Deed, settlement: Amount) -> Amount {
    let price = settlement.min(deed.balance);
    let refund = deed.balance - price;
    deed.balance = price;
    refund
}
