//! Text normalization for KAPREKAR-IN.
//!
//! Cleans up raw user input before it reaches validation:
//! - Whitespace trimming
//! - Surrounding quote removal
//! - Digit group separators (`1_234`)

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Signed integer written with `_` between digit groups
    static ref DIGIT_GROUPS: Regex = Regex::new(r"^[+-]?[0-9]+(_[0-9]+)+$").unwrap();

    /// Signed integer of any width
    static ref INTEGER: Regex = Regex::new(r"^[+-]?[0-9]+$").unwrap();
}

/// Normalize text for validation
pub fn normalize(text: &str) -> String {
    let mut result = text.trim();

    // Strip one layer of matching quotes
    for quote in ['"', '\''] {
        if result.len() >= 2 && result.starts_with(quote) && result.ends_with(quote) {
            result = result[1..result.len() - 1].trim();
            break;
        }
    }

    if DIGIT_GROUPS.is_match(result) {
        result.replace('_', "")
    } else {
        result.to_string()
    }
}

/// True when normalized text is written as an integer, however large
pub fn is_integer(normalized: &str) -> bool {
    INTEGER.is_match(normalized)
}
