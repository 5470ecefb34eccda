//! Inline markup and block classification for rendering lines.
//!
//! A line's raw text is never rewritten by rendering. [`tokenize`] projects it
//! into [`StyledRun`]s, and [`RenderedLine`] adds the block kind (paragraph or
//! heading) and the focus flag that decides whether delimiter syntax is shown.
//!
//! # Examples
//!
//! ```
//! use richline::markup::{tokenize, InlineStyle};
//!
//! let runs = tokenize("a**b**c");
//! assert_eq!(runs.len(), 5);
//! assert!(runs[1].syntax);
//! assert_eq!(runs[2].text, "b");
//! assert_eq!(runs[2].style, InlineStyle::BOLD);
//! ```

mod block;
mod run;
mod tokenizer;

pub use block::{BlockKind, RenderOptions, RenderedLine};
pub use run::{InlineStyle, StyledRun};
pub use tokenizer::tokenize;
