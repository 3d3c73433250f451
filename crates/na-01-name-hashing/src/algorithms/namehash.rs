//! # Namehash and Labelhash
//!
//! `name_hash("")` is 32 zero bytes; otherwise
//! `name_hash(label.rest) = keccak256(name_hash(rest) ‖ label_hash(label))`.

use super::normalize::normalize;
use crate::domain::{Hash, NameError, ZERO_HASH};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

/// Keccak-256 of arbitrary bytes.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash of a single label, independent of its position in a name.
pub fn label_hash(label: &str) -> Hash {
    keccak256(label.as_bytes())
}

/// Recursive hash of a name, computed over its normalized form.
///
/// The empty name is the root and yields the zero hash. Any empty label
/// (leading, trailing or double dot) is rejected.
pub fn name_hash(name: &str) -> Result<Hash, NameError> {
    let normalized = normalize(name);
    if normalized.is_empty() {
        return Ok(ZERO_HASH);
    }

    let labels: Vec<&str> = normalized.split('.').collect();
    if labels.iter().any(|l| l.is_empty()) {
        return Err(NameError::invalid(name, "empty label"));
    }

    Ok(fold_labels(labels.into_iter()))
}

/// Fold labels (given left to right) from the root-most label outwards.
pub(crate) fn fold_labels<'a, I>(labels: I) -> Hash
where
    I: DoubleEndedIterator<Item = &'a str>,
{
    labels
        .rev()
        .fold(ZERO_HASH, |acc, label| child_node(&acc, &label_hash(label)))
}

/// Namehash of `label.parent` from the parent's namehash and the label's hash.
pub fn child_node(parent: &Hash, label_hash: &Hash) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(parent);
    hasher.update(label_hash);
    hasher.finalize().into()
}

/// One step of a name's hash chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashChainEntry {
    /// The suffix this entry describes, e.g. `foo.eth`.
    pub suffix: String,
    /// Labelhash of the suffix's leftmost label.
    pub label_hash: Hash,
    /// Namehash of the whole suffix.
    pub name_hash: Hash,
}

impl HashChainEntry {
    /// Hex rendering `(label_hash, name_hash)` with `0x` prefixes.
    pub fn to_hex(&self) -> (String, String) {
        (
            format!("0x{}", hex::encode(self.label_hash)),
            format!("0x{}", hex::encode(self.name_hash)),
        )
    }
}

/// Hashes for every suffix of a name, root-most first.
///
/// `foo.eth` yields entries for `eth` then `foo.eth`.
pub fn hash_chain(name: &str) -> Result<Vec<HashChainEntry>, NameError> {
    let normalized = normalize(name);
    if normalized.is_empty() {
        return Ok(Vec::new());
    }

    let labels: Vec<&str> = normalized.split('.').collect();
    if labels.iter().any(|l| l.is_empty()) {
        return Err(NameError::invalid(name, "empty label"));
    }

    let mut entries = Vec::with_capacity(labels.len());
    let mut acc = ZERO_HASH;
    for i in (0..labels.len()).rev() {
        let lh = label_hash(labels[i]);
        acc = child_node(&acc, &lh);
        entries.push(HashChainEntry {
            suffix: labels[i..].join("."),
            label_hash: lh,
            name_hash: acc,
        });
    }
    Ok(entries)
}
