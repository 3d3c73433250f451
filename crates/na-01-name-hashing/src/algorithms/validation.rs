//! # Name Policy
//!
//! The registrar only accepts auctioned labels of at least seven characters.
//! Shorter names can still slip through an auction and are then subject to
//! invalidation, so the rule is checked both before bidding and before
//! invalidating.

use super::normalize::normalize;
use crate::domain::{Name, NameError};
use serde::{Deserialize, Serialize};

/// Minimum characters in the auctioned label.
pub const DEFAULT_MIN_LABEL_LENGTH: usize = 7;

/// Registrar suffix.
pub const DEFAULT_TLD: &str = "eth";

/// Length and suffix rules for registrar names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamePolicy {
    /// Registrar suffix without the dot.
    pub tld: String,
    /// Minimum characters in the auctioned label.
    pub min_label_length: usize,
}

impl Default for NamePolicy {
    fn default() -> Self {
        Self {
            tld: DEFAULT_TLD.to_string(),
            min_label_length: DEFAULT_MIN_LABEL_LENGTH,
        }
    }
}

impl NamePolicy {
    /// Create a policy.
    pub fn new(tld: impl Into<String>, min_label_length: usize) -> Self {
        Self {
            tld: tld.into(),
            min_label_length,
        }
    }

    /// Check the length rule.
    ///
    /// After stripping a trailing `.<tld>`, the label that remains directly
    /// left of the suffix must have at least `min_label_length` characters.
    pub fn validate(&self, name: &str) -> Result<(), NameError> {
        let normalized = normalize(name);
        let suffix = format!(".{}", self.tld);
        let remainder = normalized.strip_suffix(&suffix).unwrap_or(&normalized);

        if remainder.is_empty() {
            return Err(NameError::invalid(name, "no label before the registrar suffix"));
        }
        if remainder.split('.').any(str::is_empty) {
            return Err(NameError::invalid(name, "empty label"));
        }

        let label = remainder.rsplit('.').next().unwrap_or(remainder);
        let actual = label.chars().count();
        if actual < self.min_label_length {
            return Err(NameError::LabelTooShort {
                label: label.to_string(),
                actual,
                min: self.min_label_length,
            });
        }
        Ok(())
    }

    /// True if the name passes `validate`.
    pub fn is_conforming(&self, name: &str) -> bool {
        self.validate(name).is_ok()
    }

    /// Append `.<tld>` unless the input already carries it or is a
    /// 20-byte hex address (with or without `0x`).
    pub fn qualify(&self, input: &str) -> Result<String, NameError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(NameError::invalid(input, "name is required"));
        }
        let suffix = format!(".{}", self.tld);
        if normalize(trimmed).ends_with(&suffix) || is_hex_address(trimmed) {
            return Ok(trimmed.to_string());
        }
        Ok(format!("{}{}", trimmed, suffix))
    }

    /// Qualify then parse.
    pub fn parse(&self, input: &str) -> Result<Name, NameError> {
        Name::parse(&self.qualify(input)?)
    }

    /// True for names with exactly one label under the suffix (`foo.eth`).
    pub fn is_top_level(&self, name: &Name) -> bool {
        name.has_tld(&self.tld) && name.level() == 1
    }
}

/// Check the length rule with the default policy.
pub fn validate(name: &str) -> Result<(), NameError> {
    NamePolicy::default().validate(name)
}

fn is_hex_address(s: &str) -> bool {
    let body = s.strip_prefix("0x").unwrap_or(s);
    body.len() == 40 && hex::decode(body).is_ok()
}
