//! # NA-01 Name Hashing
//!
//! Hierarchical name hashing and name policy for the auction registrar.
//!
//! **Subsystem ID:** 01  
//! **Architecture:** Hexagonal (domain + pure algorithms, no I/O)  
//!
//! ## Purpose
//!
//! - `label_hash`: Keccak-256 of a single label, independent of position
//! - `name_hash`: recursive hash folded from the root-most label outwards,
//!   with the empty (root) name hashing to 32 zero bytes
//! - `normalize`: case-folding and compatibility folding per label
//! - `NamePolicy`: minimum label length and registrar suffix rules
//!
//! ## Module Structure
//!
//! ```text
//! na-01-name-hashing/
//! ├── domain/          # Name, Hash, NameError
//! └── algorithms/      # namehash, normalize, validation
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod domain;

// Re-exports
pub use algorithms::{
    child_node, hash_chain, keccak256, label_hash, name_hash, normalize, validate, HashChainEntry,
    NamePolicy, DEFAULT_MIN_LABEL_LENGTH, DEFAULT_TLD,
};
pub use domain::{Hash, Name, NameError, ZERO_HASH};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
