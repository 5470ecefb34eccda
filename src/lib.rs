//! `richline` - logical core of a block-structured rich-text editor
//!
//! A line buffer with stable line identity, a dual-anchor selection model,
//! caret navigation across soft-wrapped lines on top of a host-supplied
//! geometry provider, and an inline markup tokenizer that turns a paragraph
//! into styled runs.
//!
//! The crate performs no layout, shaping or I/O. Hosts render
//! [`RenderedLine`]s, implement [`GeometryProvider`] for their layout, and feed
//! input [`Event`]s to an [`Editor`].

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_precision_loss)] // Cell counts to f32 coordinates
#![allow(clippy::cast_sign_loss)] // Non-negative coordinates to row indices
#![allow(clippy::module_name_repetitions)] // Allow text::TextBuffer etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::needless_collect)] // Collect for assertions is clear

pub mod error;
pub mod event;
pub mod input;
pub mod markup;
pub mod text;

// Re-export core types at crate root
pub use error::{Error, ErrorKind, Result};
pub use event::{LogLevel, emit_event, emit_log, set_event_callback, set_log_callback};

// Re-export input types
pub use input::{Event, Intent, KeyCode, KeyEvent, KeyModifiers, NavIntent};

// Re-export commonly used types
pub use markup::{BlockKind, InlineStyle, RenderedLine, StyledRun, tokenize};
pub use text::{
    CaretNavigator, Direction, EditIntent, EditOutcome, Editor, EditorOptions, GeometryProvider,
    LineId, MonospaceLayout, Offset, Rect, Selection, TextBuffer, VerticalCaretMemory,
};
