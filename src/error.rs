//! Error types for richline.

use std::fmt;

use crate::text::Offset;

/// Result type alias for richline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An offset or line index outside the buffer bounds, or composition text
    /// that would not stay on the caret's line.
    OutOfRange,
    /// The geometry provider reported a position that is neither text nor a
    /// line placeholder.
    InvalidGeometry,
}

/// Error type for richline operations.
///
/// Every variant except [`Error::InvalidGeometry`] signals that the caller and
/// the buffer disagree about what exists, which is a programming error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Line index past the last line.
    LineOutOfRange { line: usize, len_lines: usize },
    /// Column past the end of its line.
    ColumnOutOfRange { offset: Offset, line_len: usize },
    /// Range whose end precedes its start.
    ReversedRange { start: Offset, end: Offset },
    /// Merge requested for the first line.
    NoPreviousLine,
    /// Composition text said to precede the caret is longer than the text
    /// before it on its line.
    CompositionOutOfRange { caret: Offset, previous_len: usize },
    /// Composition text containing a line break.
    LineBreakInComposition { caret: Offset },
    /// Geometry cannot classify the container at this offset.
    InvalidGeometry { offset: Offset },
}

impl Error {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidGeometry { .. } => ErrorKind::InvalidGeometry,
            _ => ErrorKind::OutOfRange,
        }
    }

    /// Whether this is an out-of-range (structural) error.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        self.kind() == ErrorKind::OutOfRange
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LineOutOfRange { line, len_lines } => {
                write!(f, "line {line} out of range for {len_lines} lines")
            }
            Self::ColumnOutOfRange { offset, line_len } => write!(
                f,
                "column {} out of range for line {} of length {line_len}",
                offset.column, offset.line
            ),
            Self::ReversedRange { start, end } => {
                write!(f, "range end {end} precedes start {start}")
            }
            Self::NoPreviousLine => write!(f, "cannot merge the first line"),
            Self::CompositionOutOfRange { caret, previous_len } => write!(
                f,
                "composition of length {previous_len} does not fit before caret {caret}"
            ),
            Self::LineBreakInComposition { caret } => {
                write!(f, "composition at {caret} contains a line break")
            }
            Self::InvalidGeometry { offset } => {
                write!(f, "no text or placeholder container at {offset}")
            }
        }
    }
}

impl std::error::Error for Error {}
