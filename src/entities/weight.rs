// ⚖️ Weight Value - a single validated weight reading
//
// A Weight is a VALUE: immutable, compared by its normalized text.
// The only way to get one is through Weight::parse, so every Weight in the
// system already satisfies the format constraint.

use std::fmt;
use std::str::FromStr;

use super::ConstraintError;

pub const MESSAGE_WEIGHT_CONSTRAINTS: &str =
    "Weights should be a positive number with an optional decimal part, e.g. 55 or 72.5";

// ============================================================================
// WEIGHT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Weight {
    value: String,
}

impl Weight {
    /// Validate and build a Weight from raw user or storage input.
    ///
    /// Surrounding whitespace is dropped; the remaining text is kept as-is,
    /// so "72.50" and "72.5" are different readings.
    pub fn parse(raw: &str) -> Result<Self, ConstraintError> {
        let trimmed = raw.trim();
        if !Self::is_valid(trimmed) {
            return Err(ConstraintError::new("weight", MESSAGE_WEIGHT_CONSTRAINTS));
        }

        Ok(Weight {
            value: trimmed.to_string(),
        })
    }

    /// Digits, optionally followed by a dot and more digits.
    pub fn is_valid(candidate: &str) -> bool {
        let (whole, fraction) = match candidate.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (candidate, None),
        };

        let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

        all_digits(whole) && fraction.map_or(true, all_digits)
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for Weight {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weight::parse(s)
    }
}

// ============================================================================
// TESTS
// ============================================================================
