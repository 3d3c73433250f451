//! # Name
//!
//! A dot-separated sequence of labels, held in raw and normalized form.

use super::errors::{Hash, NameError};
use crate::algorithms::{label_hash, normalize};
use crate::algorithms::namehash::fold_labels;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed, normalized name such as `foo.eth`.
///
/// Labels are stored left to right (`["foo", "eth"]`). The empty name is the
/// root and has no labels.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Name {
    raw: String,
    normalized: String,
    labels: Vec<String>,
}

impl Name {
    /// Parse and normalize a name. Fails on empty labels.
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Ok(Self {
                raw: raw.to_string(),
                normalized,
                labels: Vec::new(),
            });
        }

        let labels: Vec<String> = normalized.split('.').map(str::to_string).collect();
        if labels.iter().any(String::is_empty) {
            return Err(NameError::invalid(raw, "empty label"));
        }

        Ok(Self {
            raw: raw.to_string(),
            normalized,
            labels,
        })
    }

    /// The input as supplied.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The normalized form.
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Labels, left to right.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// True for the root (empty) name.
    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of dots: `eth` → 0, `foo.eth` → 1, `sub.foo.eth` → 2.
    pub fn level(&self) -> usize {
        self.labels.len().saturating_sub(1)
    }

    /// Leftmost label, if any.
    pub fn leftmost_label(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }

    /// Recursive namehash of the normalized name.
    pub fn hash(&self) -> Hash {
        fold_labels(self.labels.iter().map(String::as_str))
    }

    /// Labelhash of the leftmost label (zero hash for the root).
    pub fn leftmost_label_hash(&self) -> Hash {
        self.leftmost_label()
            .map(label_hash)
            .unwrap_or(super::errors::ZERO_HASH)
    }

    /// The enclosing name (`foo.eth` → `eth`). None for the root.
    pub fn parent(&self) -> Option<Name> {
        if self.labels.is_empty() {
            return None;
        }
        let labels = self.labels[1..].to_vec();
        Some(Self {
            raw: labels.join("."),
            normalized: labels.join("."),
            labels,
        })
    }

    /// Split `sub.foo.eth` into (`sub`, `foo.eth`). Needs at least three labels.
    pub fn split_subdomain(&self) -> Result<(String, Name), NameError> {
        if self.labels.len() < 3 {
            return Err(NameError::invalid(
                &self.raw,
                "a subdomain needs at least three labels",
            ));
        }
        let parent = self
            .parent()
            .ok_or_else(|| NameError::invalid(&self.raw, "no parent domain"))?;
        Ok((self.labels[0].clone(), parent))
    }

    /// True if the last label equals `tld`.
    pub fn has_tld(&self, tld: &str) -> bool {
        self.labels.last().map(|l| l == tld).unwrap_or(false)
    }

    /// The label directly left of `tld` (the label that goes to auction).
    pub fn auction_label(&self, tld: &str) -> Option<&str> {
        if !self.has_tld(tld) || self.labels.len() < 2 {
            return None;
        }
        self.labels.get(self.labels.len() - 2).map(String::as_str)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

impl std::str::FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
