//! Logical caret positions.

use std::fmt;

/// A logical caret position: line index and column in Unicode scalar values.
///
/// Offsets order lexicographically by `(line, column)`. A column equal to the
/// line length is the end of that line, which is a different position from the
/// start of the next line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Offset {
    /// Line index (0-indexed).
    pub line: usize,
    /// Column in scalar values (0-indexed).
    pub column: usize,
}

impl Offset {
    /// Create an offset.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The start of the document.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0, 0)
    }

    /// Same line, different column.
    #[must_use]
    pub const fn with_column(self, column: usize) -> Self {
        Self::new(self.line, column)
    }
}

impl From<(usize, usize)> for Offset {
    fn from((line, column): (usize, usize)) -> Self {
        Self::new(line, column)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.line, self.column)
    }
}
