//! Dual-anchor selection model.
//!
//! A [`Selection`] is an immutable value: every operation returns a new
//! selection. The two ends are stored ordered (`start <= end`) and
//! `focus_is_end` records which of them the user is extending, so that a
//! Shift+arrow gesture keeps moving the same end after it reverses direction.

use crate::text::{Offset, TextBuffer};

/// Selection or caret within a [`TextBuffer`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    start: Offset,
    end: Offset,
    focus_is_end: bool,
}

impl Selection {
    /// Create a selection from an anchor and a focus in any order.
    #[must_use]
    pub fn new(anchor: Offset, focus: Offset) -> Self {
        if focus > anchor {
            Self {
                start: anchor,
                end: focus,
                focus_is_end: true,
            }
        } else {
            Self {
                start: focus,
                end: anchor,
                focus_is_end: false,
            }
        }
    }

    /// A caret at `offset`.
    #[must_use]
    pub const fn collapsed(offset: Offset) -> Self {
        Self {
            start: offset,
            end: offset,
            focus_is_end: false,
        }
    }

    /// Collapse both ends to `offset`.
    #[must_use]
    pub const fn collapse_to(self, offset: Offset) -> Self {
        Self::collapsed(offset)
    }

    /// Collapse to the start of the selected range.
    #[must_use]
    pub const fn collapse_to_start(self) -> Self {
        Self::collapsed(self.start)
    }

    /// Collapse to the end of the selected range.
    #[must_use]
    pub const fn collapse_to_end(self) -> Self {
        Self::collapsed(self.end)
    }

    /// The selected range as `(start, end)` with `start <= end`.
    #[must_use]
    pub const fn normalize(self) -> (Offset, Offset) {
        (self.start, self.end)
    }

    #[must_use]
    pub const fn start(self) -> Offset {
        self.start
    }

    #[must_use]
    pub const fn end(self) -> Offset {
        self.end
    }

    /// Whether the end (rather than the start) is being extended.
    #[must_use]
    pub const fn focus_is_end(self) -> bool {
        self.focus_is_end
    }

    /// The end being extended by the user.
    #[must_use]
    pub const fn focus(self) -> Offset {
        if self.focus_is_end { self.end } else { self.start }
    }

    /// The end that stays put while the focus moves.
    #[must_use]
    pub const fn anchor(self) -> Offset {
        if self.focus_is_end { self.start } else { self.end }
    }

    /// Check if this is a caret rather than a range.
    #[must_use]
    pub fn is_collapsed(self) -> bool {
        self.start == self.end
    }

    /// First and last line touched by the selection.
    #[must_use]
    pub const fn line_span(self) -> (usize, usize) {
        (self.start.line, self.end.line)
    }

    /// Check if a line is touched by the selection.
    #[must_use]
    pub const fn touches_line(self, line: usize) -> bool {
        self.start.line <= line && line <= self.end.line
    }

    /// Move the focus end to `offset`, as a Shift+arrow or drag gesture does.
    ///
    /// While the focus stays strictly beyond the anchor only the focus moves.
    /// Landing exactly on the anchor collapses the selection there. Moving past
    /// the anchor re-anchors at the old anchor with `offset` as the new focus
    /// on the other side. In the last two cases `focus_is_end` flips.
    #[must_use]
    pub fn move_focus_to(self, offset: Offset) -> Self {
        if self.focus_is_end {
            let anchor = self.start;
            if offset > anchor {
                Self {
                    start: anchor,
                    end: offset,
                    focus_is_end: true,
                }
            } else if offset == anchor {
                Self {
                    start: anchor,
                    end: anchor,
                    focus_is_end: false,
                }
            } else {
                Self {
                    start: offset,
                    end: anchor,
                    focus_is_end: false,
                }
            }
        } else {
            let anchor = self.end;
            if offset < anchor {
                Self {
                    start: offset,
                    end: anchor,
                    focus_is_end: false,
                }
            } else if offset == anchor {
                Self {
                    start: anchor,
                    end: anchor,
                    focus_is_end: true,
                }
            } else {
                Self {
                    start: anchor,
                    end: offset,
                    focus_is_end: true,
                }
            }
        }
    }

    /// Clamp both ends into the bounds of `buffer`.
    #[must_use]
    pub fn clamp(self, buffer: &TextBuffer) -> Self {
        Self {
            start: buffer.clamp(self.start),
            end: buffer.clamp(self.end),
            focus_is_end: self.focus_is_end,
        }
    }
}
