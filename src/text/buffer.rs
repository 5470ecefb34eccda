//! Line buffer with stable line identity.
//!
//! This module provides [`TextBuffer`], an ordered list of [`Line`]s. Every
//! mutation returns a new buffer and leaves the receiver untouched, so a
//! buffer value is a snapshot that can be rendered while the next edit is
//! computed. Lines are shared between snapshots; an edit only allocates the
//! lines it touches.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::text::Offset;

/// Stable identity of a line, used by renderers to diff line lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(u64);

impl LineId {
    /// Raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One paragraph of text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    id: LineId,
    text: String,
    len: usize,
}

impl Line {
    fn new(id: LineId, text: String) -> Self {
        let len = text.chars().count();
        Self { id, text, len }
    }

    /// Identity of this line.
    #[must_use]
    pub fn id(&self) -> LineId {
        self.id
    }

    /// Raw text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in Unicode scalar values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte index of a column, or `None` past the end of the line.
    #[must_use]
    pub fn byte_index(&self, column: usize) -> Option<usize> {
        if column == self.len {
            return Some(self.text.len());
        }
        self.text.char_indices().nth(column).map(|(idx, _)| idx)
    }

    fn split_at_column(&self, column: usize) -> (&str, &str) {
        let idx = self.byte_index(column).unwrap_or(self.text.len());
        self.text.split_at(idx)
    }
}

/// Ordered, never-empty collection of lines.
///
/// The buffer always holds at least one line; an empty document is a single
/// empty line. Line ids come from a counter that only grows, so an id is never
/// handed out twice within a buffer's lifetime, even after merges.
#[derive(Clone, Debug)]
pub struct TextBuffer {
    lines: Vec<Arc<Line>>,
    next_id: u64,
}

impl TextBuffer {
    /// Create a buffer holding one empty line.
    #[must_use]
    pub fn new() -> Self {
        Self::from_lines([""])
    }

    /// Create a buffer from text, splitting on `\n` (a trailing `\r` on each
    /// line is dropped).
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self::from_lines(text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line)))
    }

    /// Create a buffer from individual lines. An empty iterator yields one
    /// empty line.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut buffer = Self {
            lines: Vec::new(),
            next_id: 0,
        };
        for text in lines {
            let id = buffer.mint_id();
            buffer
                .lines
                .push(Arc::new(Line::new(id, text.as_ref().to_owned())));
        }
        if buffer.lines.is_empty() {
            let id = buffer.mint_id();
            buffer.lines.push(Arc::new(Line::new(id, String::new())));
        }
        buffer
    }

    /// Get the number of lines (always at least one).
    #[must_use]
    pub fn len_lines(&self) -> usize {
        self.lines.len()
    }

    /// Get a line by index.
    #[must_use]
    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx).map(AsRef::as_ref)
    }

    /// Iterate over all lines.
    pub fn lines(&self) -> impl Iterator<Item = &Line> + '_ {
        self.lines.iter().map(AsRef::as_ref)
    }

    /// Length of a line in scalar values.
    #[must_use]
    pub fn line_len(&self, idx: usize) -> Option<usize> {
        self.line(idx).map(Line::len)
    }

    /// Index of the line carrying `id`.
    #[must_use]
    pub fn index_of(&self, id: LineId) -> Option<usize> {
        self.lines.iter().position(|line| line.id == id)
    }

    /// Id the next created line will receive.
    #[must_use]
    pub fn next_id(&self) -> LineId {
        LineId(self.next_id)
    }

    /// The end of the document.
    #[must_use]
    pub fn end_offset(&self) -> Offset {
        let last = self.lines.len() - 1;
        Offset::new(last, self.lines[last].len)
    }

    /// Check whether an offset addresses a valid caret position.
    #[must_use]
    pub fn contains(&self, offset: Offset) -> bool {
        self.validate(offset).is_ok()
    }

    /// Validate an offset against the buffer bounds.
    pub fn validate(&self, offset: Offset) -> Result<()> {
        let line = self.line_ref(offset.line)?;
        if offset.column > line.len {
            return Err(Error::ColumnOutOfRange {
                offset,
                line_len: line.len,
            });
        }
        Ok(())
    }

    /// Clamp an offset into the buffer bounds. Offsets past the last line
    /// clamp to the end of the document, which keeps clamping monotonic.
    #[must_use]
    pub fn clamp(&self, offset: Offset) -> Offset {
        match self.lines.get(offset.line) {
            Some(line) => Offset::new(offset.line, offset.column.min(line.len)),
            None => self.end_offset(),
        }
    }

    /// Full text with lines joined by `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Text between two offsets with lines joined by `\n`.
    pub fn slice(&self, start: Offset, end: Offset) -> Result<String> {
        self.validate_range(start, end)?;
        if start.line == end.line {
            let line = &self.lines[start.line];
            let (_, tail) = line.split_at_column(start.column);
            let taken = end.column - start.column;
            return Ok(tail.chars().take(taken).collect());
        }

        let (_, head) = self.lines[start.line].split_at_column(start.column);
        let mut out = head.to_owned();
        for line in &self.lines[start.line + 1..end.line] {
            out.push('\n');
            out.push_str(&line.text);
        }
        let (tail, _) = self.lines[end.line].split_at_column(end.column);
        out.push('\n');
        out.push_str(tail);
        Ok(out)
    }

    /// Split a line at a column.
    ///
    /// The text before `column` keeps the original id; the text after it moves
    /// to a new line with a freshly minted id.
    pub fn split_line(&self, line: usize, column: usize) -> Result<Self> {
        self.validate(Offset::new(line, column))?;
        let current = &self.lines[line];
        let (head, tail) = current.split_at_column(column);

        let mut next = self.clone();
        let new_id = next.mint_id();
        next.lines[line] = Arc::new(Line::new(current.id, head.to_owned()));
        next.lines
            .insert(line + 1, Arc::new(Line::new(new_id, tail.to_owned())));
        Ok(next)
    }

    /// Join line `line` onto the end of line `line - 1`.
    ///
    /// The merged line keeps the id of the earlier line.
    pub fn merge_lines(&self, line: usize) -> Result<Self> {
        self.line_ref(line)?;
        if line == 0 {
            return Err(Error::NoPreviousLine);
        }
        let prev = &self.lines[line - 1];
        let mut text = String::with_capacity(prev.text.len() + self.lines[line].text.len());
        text.push_str(&prev.text);
        text.push_str(&self.lines[line].text);

        let mut next = self.clone();
        next.lines
            .splice(line - 1..=line, [Arc::new(Line::new(prev.id, text))]);
        Ok(next)
    }

    /// Replace the text between `start` and `end` with `inserted`.
    ///
    /// The lines from `start.line` to `end.line` collapse into one line that
    /// keeps the id of the start line. With `start == end` this is a plain
    /// insertion, with an empty `inserted` a plain deletion. `inserted` is
    /// spliced verbatim.
    pub fn replace_range(&self, start: Offset, end: Offset, inserted: &str) -> Result<Self> {
        self.validate_range(start, end)?;
        let (head, _) = self.lines[start.line].split_at_column(start.column);
        let (_, tail) = self.lines[end.line].split_at_column(end.column);

        let mut text = String::with_capacity(head.len() + inserted.len() + tail.len());
        text.push_str(head);
        text.push_str(inserted);
        text.push_str(tail);

        let mut next = self.clone();
        let id = self.lines[start.line].id;
        next.lines
            .splice(start.line..=end.line, [Arc::new(Line::new(id, text))]);
        Ok(next)
    }

    fn validate_range(&self, start: Offset, end: Offset) -> Result<()> {
        self.validate(start)?;
        self.validate(end)?;
        if end < start {
            return Err(Error::ReversedRange { start, end });
        }
        Ok(())
    }

    fn line_ref(&self, line: usize) -> Result<&Line> {
        self.line(line).ok_or(Error::LineOutOfRange {
            line,
            len_lines: self.lines.len(),
        })
    }

    fn mint_id(&mut self) -> LineId {
        let id = LineId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for TextBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.lines.len() == other.lines.len()
            && self
                .lines
                .iter()
                .zip(&other.lines)
                .all(|(a, b)| a.id == b.id && a.text == b.text)
    }
}

impl Eq for TextBuffer {}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(buffer: &TextBuffer) -> Vec<&str> {
        buffer.lines().map(Line::text).collect()
    }

    #[test]
    fn test_new_buffer_has_one_empty_line() {
        let buffer = TextBuffer::new();
        assert_eq!(buffer.len_lines(), 1);
        assert_eq!(buffer.line_len(0), Some(0));
        assert_eq!(buffer.end_offset(), Offset::zero());

        let empty: [&str; 0] = [];
        assert_eq!(TextBuffer::from_lines(empty).len_lines(), 1);
    }

    #[test]
    fn test_with_text_splits_lines() {
        let buffer = TextBuffer::with_text("abc\r\nde\n");
        assert_eq!(texts(&buffer), vec!["abc", "de", ""]);
        assert_eq!(buffer.text(), "abc\nde\n");
    }

    #[test]
    fn test_columns_are_scalar_values() {
        let buffer = TextBuffer::with_text("텍스트a");
        let line = buffer.line(0).unwrap();
        assert_eq!(line.len(), 4);
        assert_eq!(line.byte_index(1), Some(3));
        assert_eq!(line.byte_index(4), Some(10));
        assert_eq!(line.byte_index(5), None);
    }

    #[test]
    fn test_split_line_mints_new_id() {
        let buffer = TextBuffer::from_lines(["abcd"]);
        let original = buffer.line(0).unwrap().id();
        let split = buffer.split_line(0, 2).unwrap();

        assert_eq!(texts(&split), vec!["ab", "cd"]);
        assert_eq!(split.line(0).unwrap().id(), original);
        assert_ne!(split.line(1).unwrap().id(), original);
        // The receiver is untouched.
        assert_eq!(texts(&buffer), vec!["abcd"]);
    }

    #[test]
    fn test_split_line_at_ends() {
        let buffer = TextBuffer::from_lines(["ab"]);
        assert_eq!(texts(&buffer.split_line(0, 0).unwrap()), vec!["", "ab"]);
        assert_eq!(texts(&buffer.split_line(0, 2).unwrap()), vec!["ab", ""]);
    }

    #[test]
    fn test_split_line_out_of_range() {
        let buffer = TextBuffer::from_lines(["ab"]);
        assert!(matches!(
            buffer.split_line(1, 0),
            Err(Error::LineOutOfRange { line: 1, .. })
        ));
        assert!(matches!(
            buffer.split_line(0, 3),
            Err(Error::ColumnOutOfRange { line_len: 2, .. })
        ));
    }

    #[test]
    fn test_merge_lines_keeps_earlier_id() {
        let buffer = TextBuffer::from_lines(["abc", "de", "f"]);
        let first = buffer.line(0).unwrap().id();
        let merged = buffer.merge_lines(1).unwrap();
        assert_eq!(texts(&merged), vec!["abcde", "f"]);
        assert_eq!(merged.line(0).unwrap().id(), first);
    }

    #[test]
    fn test_merge_lines_rejects_first_and_missing() {
        let buffer = TextBuffer::from_lines(["abc", "de"]);
        assert_eq!(buffer.merge_lines(0), Err(Error::NoPreviousLine));
        assert!(matches!(
            buffer.merge_lines(2),
            Err(Error::LineOutOfRange { .. })
        ));
    }

    #[test]
    fn test_replace_range_insert() {
        let buffer = TextBuffer::from_lines(["ac"]);
        let at = Offset::new(0, 1);
        let next = buffer.replace_range(at, at, "b").unwrap();
        assert_eq!(texts(&next), vec!["abc"]);
    }

    #[test]
    fn test_replace_range_across_lines() {
        let buffer = TextBuffer::from_lines(["hello", "big", "world"]);
        let id = buffer.line(0).unwrap().id();
        let next = buffer
            .replace_range(Offset::new(0, 2), Offset::new(2, 3), "-")
            .unwrap();
        assert_eq!(texts(&next), vec!["he-ld"]);
        assert_eq!(next.line(0).unwrap().id(), id);
    }

    #[test]
    fn test_replace_range_rejects_reversed() {
        let buffer = TextBuffer::from_lines(["hello"]);
        let err = buffer
            .replace_range(Offset::new(0, 3), Offset::new(0, 1), "")
            .unwrap_err();
        assert!(matches!(err, Error::ReversedRange { .. }));
    }

    #[test]
    fn test_ids_never_reused() {
        let buffer = TextBuffer::from_lines(["ab"]);
        let split = buffer.split_line(0, 1).unwrap();
        let second = split.line(1).unwrap().id();
        let merged = split.merge_lines(1).unwrap();
        let again = merged.split_line(0, 1).unwrap();
        assert_ne!(again.line(1).unwrap().id(), second);
        assert!(again.next_id() > second);
    }

    #[test]
    fn test_slice() {
        let buffer = TextBuffer::from_lines(["hello", "big", "world"]);
        assert_eq!(
            buffer.slice(Offset::new(0, 1), Offset::new(0, 4)).unwrap(),
            "ell"
        );
        assert_eq!(
            buffer.slice(Offset::new(0, 3), Offset::new(2, 2)).unwrap(),
            "lo\nbig\nwo"
        );
    }

    #[test]
    fn test_clamp_and_index_of() {
        let buffer = TextBuffer::from_lines(["abc", "de"]);
        assert_eq!(buffer.clamp(Offset::new(9, 9)), Offset::new(1, 2));
        assert_eq!(buffer.clamp(Offset::new(0, 9)), Offset::new(0, 3));
        let id = buffer.line(1).unwrap().id();
        assert_eq!(buffer.index_of(id), Some(1));
    }
}
