//! Edit intents and their effect on a buffer snapshot.
//!
//! An [`EditIntent`] is applied to a buffer and a selection and produces the
//! next buffer snapshot and selection. Nothing is mutated in place; the input
//! snapshot stays valid for whoever is still rendering it.
//!
//! # Examples
//!
//! ```
//! use richline::{EditIntent, Offset, Selection, TextBuffer};
//!
//! let buffer = TextBuffer::from_lines(["abcd"]);
//! let caret = Selection::collapsed(Offset::new(0, 2));
//!
//! let outcome = EditIntent::Enter.apply(&buffer, caret).unwrap();
//! assert_eq!(outcome.buffer.text(), "ab\ncd");
//! assert_eq!(outcome.selection, Selection::collapsed(Offset::new(1, 0)));
//! ```

use crate::error::{Error, Result};
use crate::text::{Offset, Selection, TextBuffer};

/// A text-changing intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditIntent {
    /// Insert text at the caret, replacing any selected range. A `\n` in the
    /// text starts a new line.
    InsertChar(String),
    /// Delete the selected range, or the scalar before the caret.
    Backspace,
    /// Split the line at the caret, replacing any selected range first.
    Enter,
    /// Replace the live composition text before the caret with `data`.
    /// `data` must not contain a line break.
    CompositionUpdate {
        data: String,
        /// Length of the composition text currently before the caret.
        previous_len: usize,
    },
    /// Commit the live composition.
    CompositionEnd,
}

/// Result of applying an [`EditIntent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditOutcome {
    pub buffer: TextBuffer,
    pub selection: Selection,
    /// Length of the live composition text before the caret, `0` when none.
    pub composition_len: usize,
}

impl EditOutcome {
    fn new(buffer: TextBuffer, caret: Offset) -> Self {
        Self {
            buffer,
            selection: Selection::collapsed(caret),
            composition_len: 0,
        }
    }
}

impl EditIntent {
    /// Shorthand for [`EditIntent::InsertChar`].
    pub fn insert(text: impl Into<String>) -> Self {
        Self::InsertChar(text.into())
    }

    /// Check if this intent is part of a composition.
    #[must_use]
    pub fn is_composition(&self) -> bool {
        matches!(self, Self::CompositionUpdate { .. } | Self::CompositionEnd)
    }

    /// Apply this intent to `buffer` with `selection` current.
    ///
    /// Fails with an out-of-range error when the selection does not fit the
    /// buffer.
    pub fn apply(&self, buffer: &TextBuffer, selection: Selection) -> Result<EditOutcome> {
        let (start, end) = selection.normalize();
        buffer.validate(start)?;
        buffer.validate(end)?;

        match self {
            Self::InsertChar(text) => {
                let (next, caret) = insert_text(buffer, start, end, text)?;
                Ok(EditOutcome::new(next, caret))
            }
            Self::Backspace => backspace(buffer, start, end),
            Self::Enter => {
                let (next, caret) = insert_text(buffer, start, end, "\n")?;
                Ok(EditOutcome::new(next, caret))
            }
            Self::CompositionUpdate { data, previous_len } => {
                if data.contains('\n') {
                    return Err(Error::LineBreakInComposition { caret: start });
                }
                let replace_from = if start == end {
                    let column = start.column.checked_sub(*previous_len).ok_or(
                        Error::CompositionOutOfRange {
                            caret: start,
                            previous_len: *previous_len,
                        },
                    )?;
                    start.with_column(column)
                } else {
                    start
                };
                let next = buffer.replace_range(replace_from, end, data)?;
                let composition_len = data.chars().count();
                let caret = replace_from.with_column(replace_from.column + composition_len);
                Ok(EditOutcome {
                    composition_len,
                    ..EditOutcome::new(next, caret)
                })
            }
            Self::CompositionEnd => Ok(EditOutcome {
                buffer: buffer.clone(),
                selection,
                composition_len: 0,
            }),
        }
    }
}

fn backspace(buffer: &TextBuffer, start: Offset, end: Offset) -> Result<EditOutcome> {
    if start != end {
        let next = buffer.replace_range(start, end, "")?;
        return Ok(EditOutcome::new(next, start));
    }
    if start.column > 0 {
        let prev = start.with_column(start.column - 1);
        let next = buffer.replace_range(prev, start, "")?;
        return Ok(EditOutcome::new(next, prev));
    }
    if start.line == 0 {
        return Ok(EditOutcome::new(buffer.clone(), start));
    }

    let join = buffer.line_len(start.line - 1).unwrap_or(0);
    let next = buffer.merge_lines(start.line)?;
    Ok(EditOutcome::new(next, Offset::new(start.line - 1, join)))
}

/// Replace `start..end` with `text`, splitting lines at each `\n`. Returns the
/// new buffer and the caret after the inserted text.
fn insert_text(
    buffer: &TextBuffer,
    start: Offset,
    end: Offset,
    text: &str,
) -> Result<(TextBuffer, Offset)> {
    let mut parts = text.split('\n');
    let first = parts.next().unwrap_or_default();
    let mut next = buffer.replace_range(start, end, first)?;
    let mut caret = start.with_column(start.column + first.chars().count());

    for part in parts {
        next = next.split_line(caret.line, caret.column)?;
        caret = Offset::new(caret.line + 1, 0);
        if !part.is_empty() {
            next = next.replace_range(caret, caret, part)?;
            caret.column = part.chars().count();
        }
    }
    Ok((next, caret))
}
