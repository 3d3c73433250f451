//! # Secure Salt Type
//!
//! Wrapper for the bidder's memorable salt phrase that zeroizes memory on drop.
//!
//! ## Security
//!
//! The salt is the only thing that keeps a sealed bid's value hidden until
//! reveal. It must not end up in logs, debug output or serialized receipts.
//! Serialization emits the Keccak-256 digest that actually goes into the seal,
//! never the phrase.

use na_01_name_hashing::{keccak256, Hash};
use serde::{Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A salt phrase that zeroizes on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct BidSalt {
    phrase: String,
}

impl BidSalt {
    /// Wrap a phrase.
    pub fn new(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
        }
    }

    /// True if the phrase is empty.
    pub fn is_empty(&self) -> bool {
        self.phrase.is_empty()
    }

    /// Keccak-256 of the phrase, as bound into the seal.
    pub fn digest(&self) -> Hash {
        keccak256(self.phrase.as_bytes())
    }
}

impl From<&str> for BidSalt {
    fn from(phrase: &str) -> Self {
        Self::new(phrase)
    }
}

impl From<String> for BidSalt {
    fn from(phrase: String) -> Self {
        Self::new(phrase)
    }
}

impl std::fmt::Debug for BidSalt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the phrase
        f.write_str("BidSalt(***)")
    }
}

impl std::fmt::Display for BidSalt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("***")
    }
}

impl Serialize for BidSalt {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(self.digest()))
    }
}
