//! # Name Normalization
//!
//! Each label is compatibility-folded (NFKC) and lowercased until it stops
//! changing. Labels are folded independently so the label count is preserved:
//! a character that folds to `.` (e.g. U+FF0E FULLWIDTH FULL STOP) is dropped
//! from its label instead of splitting it.

use unicode_normalization::UnicodeNormalization;

/// Normalize a name. Idempotent and label-count preserving.
pub fn normalize(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    trimmed
        .split('.')
        .map(normalize_label)
        .collect::<Vec<_>>()
        .join(".")
}

fn normalize_label(label: &str) -> String {
    let mut current = fold_once(label);
    loop {
        let next = fold_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn fold_once(label: &str) -> String {
    label
        .nfkc()
        .collect::<String>()
        .to_lowercase()
        .chars()
        .filter(|c| *c != '.')
        .collect()
}
