//! Text storage, selection, caret navigation and editing.
//!
//! Key types:
//!
//! - [`TextBuffer`]: immutable snapshots of lines with stable [`LineId`]s
//! - [`Selection`]: ordered range with a remembered focus end
//! - [`GeometryProvider`]: host capability mapping offsets to caret rects
//! - [`CaretNavigator`]: arrow-key targets over a buffer and its layout
//! - [`EditIntent`]: text changes producing the next snapshot
//! - [`Editor`]: a session processing one intent at a time
//!
//! # Examples
//!
//! ```
//! use richline::text::{
//!     CaretNavigator, LayoutMetrics, MonospaceLayout, Offset, TextBuffer,
//!     VerticalCaretMemory,
//! };
//!
//! // One paragraph soft-wrapped at ten cells.
//! let buffer = TextBuffer::from_lines(["abcdefghij12345"]);
//! let layout = MonospaceLayout::new(&buffer, LayoutMetrics::wrapping_at(10));
//! let navigator = CaretNavigator::new(&buffer, &layout);
//!
//! let mut memory = VerticalCaretMemory::new();
//! let below = navigator.caret_down(Offset::new(0, 3), &mut memory).unwrap();
//! assert_eq!(below, Offset::new(0, 13));
//! ```

mod buffer;
mod caret;
mod edit;
mod editor;
mod geometry;
mod offset;
mod selection;

pub use buffer::{Line, LineId, TextBuffer};
pub use caret::{CaretNavigator, Direction, VerticalCaretMemory};
pub use edit::{EditIntent, EditOutcome};
pub use editor::{Composition, Editor, EditorOptions, SelectionGeometry};
pub use geometry::{Container, GeometryProvider, LayoutMetrics, MonospaceLayout, Rect};
pub use offset::Offset;
pub use selection::Selection;
