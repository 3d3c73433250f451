//! # Algorithms Module
//!
//! Pure hashing, normalization and policy functions.

pub mod namehash;
pub mod normalize;
pub mod validation;

pub use namehash::{child_node, hash_chain, keccak256, label_hash, name_hash, HashChainEntry};
pub use normalize::normalize;
pub use validation::{validate, NamePolicy, DEFAULT_MIN_LABEL_LENGTH, DEFAULT_TLD};
