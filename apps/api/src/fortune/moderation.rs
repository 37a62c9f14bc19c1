//! Structural moderation for generated candidates.
//!
//! PASS requires all of:
//! - 15 to 250 characters (Unicode scalar values, not bytes)
//! - no newline
//! - no quotation mark, straight or curly, single or double

use std::ops::RangeInclusive;

const LENGTH_BOUNDS: RangeInclusive<usize> = 15..=250;

const FORBIDDEN_CHARS: &[char] = &['\n', '"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

/// Returns true when the candidate may be shown to users.
pub fn passes(candidate: &str) -> bool {
    LENGTH_BOUNDS.contains(&candidate.chars().count()) && !candidate.contains(FORBIDDEN_CHARS)
}
