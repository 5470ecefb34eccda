//! Mapping between logical offsets and on-screen geometry.
//!
//! The editor core never lays out text itself. Hosts implement
//! [`GeometryProvider`] on top of whatever renders the lines (a browser DOM, a
//! GPU text shaper, a terminal grid). [`MonospaceLayout`] is a complete
//! provider for fixed-cell text that wraps at a column count; it backs the
//! tests and is good enough for terminal hosts.

use unicode_width::UnicodeWidthChar;

use crate::text::{Offset, TextBuffer};

/// Caret rectangle in host coordinates. Only the left edge matters for
/// navigation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, height: f32) -> Self {
        Self { x, y, height }
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// What the host renders at a caret position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Container {
    /// A run of text.
    #[default]
    Text,
    /// The stand-in for an empty line.
    Placeholder,
    /// Anything else; the caret cannot be placed here.
    Unknown,
}

impl Container {
    /// Whether a caret can live in this container.
    #[must_use]
    pub const fn hosts_caret(self) -> bool {
        matches!(self, Self::Text | Self::Placeholder)
    }
}

/// Host capability mapping offsets to caret rectangles and back.
///
/// Implementations must reflect the visual layout at call time, including soft
/// wraps. Calls are expected to be cheap and free of side effects.
pub trait GeometryProvider {
    /// Classify what is rendered at `offset`.
    fn container_at(&self, _offset: Offset) -> Container {
        Container::Text
    }

    /// Caret rectangle for an offset.
    fn rect_for_offset(&self, offset: Offset) -> Rect;

    /// Offset whose caret is closest to a point (inverse hit-test).
    fn offset_at_point(&self, x: f32, y: f32) -> Offset;
}

impl<G: GeometryProvider + ?Sized> GeometryProvider for &G {
    fn container_at(&self, offset: Offset) -> Container {
        (**self).container_at(offset)
    }

    fn rect_for_offset(&self, offset: Offset) -> Rect {
        (**self).rect_for_offset(offset)
    }

    fn offset_at_point(&self, x: f32, y: f32) -> Offset {
        (**self).offset_at_point(x, y)
    }
}

/// Metrics for [`MonospaceLayout`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutMetrics {
    /// Cells per visual row; `0` disables wrapping.
    pub wrap_columns: usize,
    /// Width of one cell.
    pub cell_width: f32,
    /// Height of one visual row.
    pub line_height: f32,
    /// Extra space between paragraphs.
    pub paragraph_spacing: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            wrap_columns: 80,
            cell_width: 1.0,
            line_height: 1.0,
            paragraph_spacing: 0.0,
        }
    }
}

impl LayoutMetrics {
    /// Unit cells wrapping at `wrap_columns`.
    #[must_use]
    pub fn wrapping_at(wrap_columns: usize) -> Self {
        Self {
            wrap_columns,
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CaretSlot {
    row: usize,
    cells: usize,
}

#[derive(Clone, Debug)]
struct LineLayout {
    top: f32,
    rows: usize,
    slots: Vec<CaretSlot>,
}

/// Character-wrapping fixed-cell layout of a [`TextBuffer`].
///
/// Wide (East Asian) characters take two cells, zero-width characters none. A
/// character that does not fit the remaining cells of a row starts the next
/// row, so the caret position at a wrap point is reported at the start of the
/// following row. Build a new layout after every buffer change.
#[derive(Clone, Debug)]
pub struct MonospaceLayout {
    metrics: LayoutMetrics,
    lines: Vec<LineLayout>,
}

impl MonospaceLayout {
    /// Lay out every line of `buffer`.
    #[must_use]
    pub fn new(buffer: &TextBuffer, metrics: LayoutMetrics) -> Self {
        let mut lines = Vec::with_capacity(buffer.len_lines());
        let mut top = 0.0f32;
        for line in buffer.lines() {
            let slots = layout_slots(line.text(), metrics.wrap_columns);
            let rows = slots.last().map_or(1, |slot| slot.row + 1);
            lines.push(LineLayout { top, rows, slots });
            top += rows as f32 * metrics.line_height + metrics.paragraph_spacing;
        }
        Self { metrics, lines }
    }

    /// Metrics this layout was built with.
    #[must_use]
    pub fn metrics(&self) -> LayoutMetrics {
        self.metrics
    }

    /// Number of visual rows a line occupies.
    #[must_use]
    pub fn rows(&self, line: usize) -> Option<usize> {
        self.lines.get(line).map(|layout| layout.rows)
    }

    /// Total number of visual rows.
    #[must_use]
    pub fn visual_rows(&self) -> usize {
        self.lines.iter().map(|layout| layout.rows).sum()
    }

    fn slot(&self, offset: Offset) -> Option<(&LineLayout, CaretSlot)> {
        let layout = self.lines.get(offset.line)?;
        let slot = *layout.slots.get(offset.column)?;
        Some((layout, slot))
    }

    fn clamp(&self, offset: Offset) -> Offset {
        let Some(last) = self.lines.len().checked_sub(1) else {
            return Offset::zero();
        };
        if offset.line > last {
            return Offset::new(last, self.lines[last].slots.len() - 1);
        }
        let max_column = self.lines[offset.line].slots.len() - 1;
        Offset::new(offset.line, offset.column.min(max_column))
    }

    fn line_at_y(&self, y: f32) -> usize {
        let line_height = self.metrics.line_height;
        self.lines
            .iter()
            .position(|layout| y < layout.top + layout.rows as f32 * line_height)
            .unwrap_or(self.lines.len().saturating_sub(1))
    }
}

impl GeometryProvider for MonospaceLayout {
    fn container_at(&self, offset: Offset) -> Container {
        match self.slot(offset) {
            Some((layout, _)) if layout.slots.len() == 1 => Container::Placeholder,
            Some(_) => Container::Text,
            None => Container::Unknown,
        }
    }

    fn rect_for_offset(&self, offset: Offset) -> Rect {
        let Some((layout, slot)) = self.slot(self.clamp(offset)) else {
            return Rect::new(0.0, 0.0, self.metrics.line_height);
        };
        Rect::new(
            slot.cells as f32 * self.metrics.cell_width,
            layout.top + slot.row as f32 * self.metrics.line_height,
            self.metrics.line_height,
        )
    }

    fn offset_at_point(&self, x: f32, y: f32) -> Offset {
        if self.lines.is_empty() {
            return Offset::zero();
        }
        let line = self.line_at_y(y);
        let layout = &self.lines[line];
        let row = if y <= layout.top {
            0
        } else {
            (((y - layout.top) / self.metrics.line_height) as usize).min(layout.rows - 1)
        };

        let mut best = None::<(usize, f32)>;
        for (column, slot) in layout.slots.iter().enumerate() {
            if slot.row != row {
                continue;
            }
            let distance = (slot.cells as f32 * self.metrics.cell_width - x).abs();
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((column, distance));
            }
        }
        Offset::new(line, best.map_or(0, |(column, _)| column))
    }
}

fn layout_slots(text: &str, wrap_columns: usize) -> Vec<CaretSlot> {
    let mut slots = Vec::with_capacity(text.len() + 1);
    let mut row = 0usize;
    let mut cells = 0usize;
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0);
        if wrap_columns > 0 && cells > 0 && cells + width > wrap_columns {
            row += 1;
            cells = 0;
        }
        slots.push(CaretSlot { row, cells });
        cells += width;
    }
    slots.push(CaretSlot { row, cells });
    slots
}
