//! Caret navigation over logical offsets and visual rows.
//!
//! Horizontal steps are plain offset arithmetic. Everything that depends on
//! how lines wrap on screen (Up/Down, visual line start/end) is a sequential
//! walk over offsets that asks a [`GeometryProvider`] where each candidate
//! caret lands and watches its x-coordinate:
//!
//! - walking forward, x grows until the walk crosses onto the next visual row,
//!   where it drops back;
//! - walking backward, x shrinks until the walk crosses onto the previous row,
//!   where it jumps up.
//!
//! A reversal of that trend, or crossing a paragraph boundary, means one row
//! boundary was passed.

use crate::error::{Error, Result};
use crate::text::geometry::GeometryProvider;
use crate::text::{Offset, TextBuffer};

/// Horizontal caret position remembered across a run of Up/Down moves.
///
/// Moving through rows of different widths would otherwise drift the caret
/// towards the left margin. The memory belongs to one editing session; any
/// intent other than a vertical step must [`clear`](Self::clear) it, and so
/// must a layout change, because the stored x is only meaningful for the
/// layout it was measured in.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VerticalCaretMemory {
    x: f32,
    cached: bool,
}

impl VerticalCaretMemory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an x-coordinate is remembered.
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.cached
    }

    /// The remembered x-coordinate, if any.
    #[must_use]
    pub fn x(&self) -> Option<f32> {
        self.cached.then_some(self.x)
    }

    /// Forget the remembered x-coordinate.
    pub fn clear(&mut self) {
        self.cached = false;
    }

    /// Return the remembered x, or remember `x` and return it.
    fn resolve(&mut self, x: f32) -> f32 {
        if !self.cached {
            self.x = x;
            self.cached = true;
        }
        self.x
    }
}

/// Arrow direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

/// Computes caret targets for one buffer snapshot and its layout.
pub struct CaretNavigator<'a, G: ?Sized> {
    buffer: &'a TextBuffer,
    geometry: &'a G,
}

impl<'a, G: GeometryProvider + ?Sized> CaretNavigator<'a, G> {
    /// Create a navigator over a snapshot and the layout that renders it.
    #[must_use]
    pub fn new(buffer: &'a TextBuffer, geometry: &'a G) -> Self {
        Self { buffer, geometry }
    }

    /// Target of an arrow key.
    ///
    /// With `jump` (the Meta modifier) Left/Right go to the visual line
    /// start/end and Up/Down to the document start/end. Only plain Up/Down
    /// read or write `memory`.
    pub fn step(
        &self,
        offset: Offset,
        direction: Direction,
        jump: bool,
        memory: &mut VerticalCaretMemory,
    ) -> Result<Offset> {
        match (direction, jump) {
            (Direction::Left, false) => self.step_left(offset),
            (Direction::Right, false) => self.step_right(offset),
            (Direction::Up, false) => self.caret_up(offset, memory),
            (Direction::Down, false) => self.caret_down(offset, memory),
            (Direction::Left, true) => self.visual_line_start(offset),
            (Direction::Right, true) => self.visual_line_end(offset),
            (Direction::Up, true) => Ok(self.document_start()),
            (Direction::Down, true) => Ok(self.document_end()),
        }
    }

    /// Start of the document.
    #[must_use]
    pub fn document_start(&self) -> Offset {
        Offset::zero()
    }

    /// End of the document.
    #[must_use]
    pub fn document_end(&self) -> Offset {
        self.buffer.end_offset()
    }

    /// One scalar to the left, wrapping to the end of the previous line.
    pub fn step_left(&self, offset: Offset) -> Result<Offset> {
        self.buffer.validate(offset)?;
        Ok(self.backward(offset).map_or(offset, |(prev, _)| prev))
    }

    /// One scalar to the right, wrapping to the start of the next line.
    pub fn step_right(&self, offset: Offset) -> Result<Offset> {
        self.buffer.validate(offset)?;
        Ok(self.forward(offset).map_or(offset, |(next, _)| next))
    }

    /// Start of the visual row containing `offset`.
    pub fn visual_line_start(&self, offset: Offset) -> Result<Offset> {
        self.check_start(offset)?;
        let mut current_x = self.x_at(offset);
        let mut prev = offset;
        let mut pos = offset;
        loop {
            let Some((next, crossed)) = self.backward(pos) else {
                return Ok(self.document_start());
            };
            if crossed {
                return Ok(prev);
            }
            pos = next;
            let new_x = self.x_at(pos);
            if pos.column == 0 {
                return Ok(pos);
            }
            if current_x <= new_x {
                return Ok(prev);
            }
            current_x = new_x;
            prev = pos;
        }
    }

    /// End of the visual row containing `offset`.
    ///
    /// On a soft-wrapped row this is the last offset whose caret still renders
    /// on that row, one before the wrap point.
    pub fn visual_line_end(&self, offset: Offset) -> Result<Offset> {
        self.check_start(offset)?;
        let mut current_x = self.x_at(offset);
        let mut prev = offset;
        let mut pos = offset;
        loop {
            let Some((next, crossed)) = self.forward(pos) else {
                return Ok(self.document_end());
            };
            if crossed {
                return Ok(prev);
            }
            pos = next;
            let new_x = self.x_at(pos);
            if Some(pos.column) == self.buffer.line_len(pos.line) {
                return Ok(pos);
            }
            if new_x <= current_x {
                return Ok(prev);
            }
            current_x = new_x;
            prev = pos;
        }
    }

    /// Caret target one visual row up.
    pub fn caret_up(&self, offset: Offset, memory: &mut VerticalCaretMemory) -> Result<Offset> {
        self.check_start(offset)?;
        let mut current_x = self.x_at(offset);
        let start_x = memory.resolve(current_x);
        let mut rows_passed = 0u8;
        let mut prev = offset;
        let mut pos = offset;
        loop {
            let Some((next, crossed)) = self.backward(pos) else {
                return Ok(self.document_start());
            };
            pos = next;
            let new_x = self.x_at(pos);
            if crossed || current_x < new_x {
                rows_passed += 1;
            }

            if rows_passed == 1 && new_x <= start_x {
                return Ok(pos);
            }
            if rows_passed >= 2 {
                return Ok(prev);
            }
            current_x = new_x;
            prev = pos;
        }
    }

    /// Caret target one visual row down.
    pub fn caret_down(&self, offset: Offset, memory: &mut VerticalCaretMemory) -> Result<Offset> {
        self.check_start(offset)?;
        let mut current_x = self.x_at(offset);
        let start_x = memory.resolve(current_x);
        let mut rows_passed = 0u8;
        let mut prev = offset;
        let mut pos = offset;
        loop {
            let Some((next, crossed)) = self.forward(pos) else {
                return Ok(self.document_end());
            };
            pos = next;
            let new_x = self.x_at(pos);
            if crossed || new_x < current_x {
                rows_passed += 1;
            }

            if rows_passed == 1 && start_x <= new_x {
                return Ok(pos);
            }
            if rows_passed >= 2 {
                return Ok(prev);
            }
            current_x = new_x;
            prev = pos;
        }
    }

    fn check_start(&self, offset: Offset) -> Result<()> {
        self.buffer.validate(offset)?;
        if self.geometry.container_at(offset).hosts_caret() {
            Ok(())
        } else {
            Err(Error::InvalidGeometry { offset })
        }
    }

    fn x_at(&self, offset: Offset) -> f32 {
        self.geometry.rect_for_offset(offset).x
    }

    /// Previous caret position and whether a paragraph boundary was crossed.
    fn backward(&self, offset: Offset) -> Option<(Offset, bool)> {
        if offset.column > 0 {
            Some((offset.with_column(offset.column - 1), false))
        } else if offset.line > 0 {
            let line = offset.line - 1;
            let len = self.buffer.line_len(line)?;
            Some((Offset::new(line, len), true))
        } else {
            None
        }
    }

    /// Next caret position and whether a paragraph boundary was crossed.
    fn forward(&self, offset: Offset) -> Option<(Offset, bool)> {
        let len = self.buffer.line_len(offset.line)?;
        if offset.column < len {
            Some((offset.with_column(offset.column + 1), false))
        } else if offset.line + 1 < self.buffer.len_lines() {
            Some((Offset::new(offset.line + 1, 0), true))
        } else {
            None
        }
    }
}
