//! # Domain Value Objects
//!
//! Immutable value types for the auction registrar.

use super::errors::AuctionError;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use na_01_name_hashing::Hash;

/// Wei amount.
pub type Amount = U256;

/// Wei per ether.
pub const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;

/// `n` whole ether in wei.
pub fn ether(n: u64) -> Amount {
    U256::from(n) * U256::from(WEI_PER_ETHER)
}

/// `n` hundredths of an ether in wei.
pub fn centi_ether(n: u64) -> Amount {
    U256::from(n) * U256::from(WEI_PER_ETHER / 100)
}

/// 20-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// The unset address.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Wrap raw bytes.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Take the trailing 20 bytes of a 32-byte digest.
    pub fn from_hash_tail(hash: &Hash) -> Self {
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&hash[12..]);
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// True for the zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = AuctionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.trim();
        let body = body.strip_prefix("0x").unwrap_or(body);
        let bytes = hex::decode(body)
            .map_err(|e| AuctionError::Validation(format!("invalid address '{}': {}", s, e)))?;
        if bytes.len() != 20 {
            return Err(AuctionError::Validation(format!(
                "invalid address '{}': expected 20 bytes, got {}",
                s,
                bytes.len()
            )));
        }
        let mut out = [0u8; 20];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Opaque reference to a submitted ledger transaction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionRef(pub Hash);

impl fmt::Display for TransactionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for TransactionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionRef({})", self)
    }
}

/// Amount locked by an auction entry.
///
/// The ledger reports zero when no second bid was revealed; that means the
/// minimum price applies, not that the name is free.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockedValue {
    /// The registrar minimum applies.
    #[default]
    Minimum,
    /// An explicit revealed amount.
    Explicit(Amount),
}

impl LockedValue {
    /// Map the raw ledger field.
    pub fn from_raw(raw: Amount) -> Self {
        if raw.is_zero() {
            Self::Minimum
        } else {
            Self::Explicit(raw)
        }
    }

    /// The raw ledger field.
    pub fn raw(&self) -> Amount {
        match self {
            Self::Minimum => U256::zero(),
            Self::Explicit(v) => *v,
        }
    }

    /// Effective amount given the registrar minimum.
    pub fn resolve(&self, min_price: Amount) -> Amount {
        match self {
            Self::Minimum => min_price,
            Self::Explicit(v) => (*v).max(min_price),
        }
    }
}

/// Raw status code reported by the registrar ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum LedgerStatus {
    /// No auction has started.
    Open = 0,
    /// Auction running (bidding or revealing, by time).
    Auction = 1,
    /// Auction finished; deed issued.
    Owned = 2,
    /// Name may never be registered.
    Forbidden = 3,
    /// Reveal window.
    Reveal = 4,
    /// Not yet released for registration.
    NotYetAvailable = 5,
    /// Reclaimed for violating the length policy.
    Invalidated = 6,
}

impl LedgerStatus {
    /// Decode a status code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Open),
            1 => Some(Self::Auction),
            2 => Some(Self::Owned),
            3 => Some(Self::Forbidden),
            4 => Some(Self::Reveal),
            5 => Some(Self::NotYetAvailable),
            6 => Some(Self::Invalidated),
            _ => None,
        }
    }

    /// Status code.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

/// Lifecycle state of a name, derived from ledger facts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NameState {
    /// No auction running; a new one may be started.
    Available,
    /// Sealed bids accepted.
    Bidding,
    /// Sealed bids may be revealed.
    Revealing,
    /// Auction over with a winner; not yet finished.
    Won,
    /// Finished; registry owner set.
    Owned,
    /// Permanently unregistrable.
    Forbidden,
    /// Not yet released.
    NotYetAvailable,
    /// Reclaimed by invalidation.
    Invalid,
}

impl NameState {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: NameState) -> bool {
        match (self, next) {
            (Self::Available, Self::Bidding) => true,
            (Self::Bidding, Self::Revealing) => true,
            (Self::Revealing, Self::Won) => true,
            (Self::Revealing, Self::Available) => true, // No bid revealed
            (Self::Won, Self::Owned) => true,
            (Self::Won, Self::Invalid) => true,
            (Self::Owned, Self::Invalid) => true,
            (Self::NotYetAvailable, Self::Available) => true,
            _ => false,
        }
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Owned | Self::Invalid | Self::Forbidden)
    }

    /// Won or Owned.
    pub fn has_winner(&self) -> bool {
        matches!(self, Self::Won | Self::Owned)
    }
}

impl fmt::Display for NameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Available => "Available",
            Self::Bidding => "Bidding",
            Self::Revealing => "Revealing",
            Self::Won => "Won",
            Self::Owned => "Owned",
            Self::Forbidden => "Forbidden",
            Self::NotYetAvailable => "NotYetAvailable",
            Self::Invalid => "Invalid",
        };
        f.write_str(s)
    }
}
