//! Logical value of one truth-table cell

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entry {
    Zero,
    One,
    DontCare,
}

impl Entry {
    /// Entry for a data-cell character; `x`, `X` and `-` are all don't care
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Entry::Zero),
            '1' => Some(Entry::One),
            '-' | 'x' | 'X' => Some(Entry::DontCare),
            _ => None,
        }
    }

    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Entry::One
        } else {
            Entry::Zero
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Entry::Zero => '0',
            Entry::One => '1',
            Entry::DontCare => '-',
        }
    }

    pub fn is_dont_care(&self) -> bool {
        matches!(self, Entry::DontCare)
    }

    /// Two entries can describe the same input bit
    pub fn overlaps(&self, other: &Entry) -> bool {
        self == other || self.is_dont_care() || other.is_dont_care()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One row of entries: input bits then output bits, MSB first per variable
pub type TruthTableRow = Vec<Entry>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_char() {
        assert_eq!(Entry::from_char('0'), Some(Entry::Zero));
        assert_eq!(Entry::from_char('1'), Some(Entry::One));
        for c in ['-', 'x', 'X'] {
            assert_eq!(Entry::from_char(c), Some(Entry::DontCare));
        }
        assert_eq!(Entry::from_char('2'), None);
    }

    #[test]
    fn test_overlaps() {
        assert!(Entry::Zero.overlaps(&Entry::Zero));
        assert!(Entry::Zero.overlaps(&Entry::DontCare));
        assert!(Entry::DontCare.overlaps(&Entry::One));
        assert!(!Entry::Zero.overlaps(&Entry::One));
    }
}
