// Position in the displayed person list.
//
// Users type 1-based positions; lookups use 0-based offsets. Keeping both
// behind one type stops the two from being mixed up.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Index {
    zero_based: usize,
}

impl Index {
    pub fn from_zero_based(zero_based: usize) -> Self {
        Index { zero_based }
    }

    /// `None` for 0, which is not a valid user-facing position.
    pub fn from_one_based(one_based: usize) -> Option<Self> {
        one_based.checked_sub(1).map(Self::from_zero_based)
    }

    pub fn zero_based(&self) -> usize {
        self.zero_based
    }

    pub fn one_based(&self) -> usize {
        self.zero_based + 1
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.one_based())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        let first = Index::from_one_based(1).unwrap();
        assert_eq!(first.zero_based(), 0);
        assert_eq!(first, Index::from_zero_based(0));
        assert_eq!(first.to_string(), "1");

        assert!(Index::from_one_based(0).is_none());
    }
}
