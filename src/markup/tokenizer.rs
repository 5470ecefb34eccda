//! Inline markup tokenizer.
//!
//! A single left-to-right pass over one line. Delimiters toggle a style flag
//! and are emitted as syntax runs carrying the style in force *before* the
//! toggle, so an opening `**` is not bold and a closing `**` is. A backslash
//! escapes exactly the next scalar: the backslash becomes a syntax run and the
//! escaped scalar a plain run, so the escaped character stays visible when
//! syntax is hidden.
//!
//! Unterminated delimiters are not errors; the style simply stays on until the
//! end of the line.

use crate::markup::run::{InlineStyle, StyledRun};

/// Delimiters in match order. `**` must precede `*`.
const DELIMITERS: [(&str, InlineStyle); 4] = [
    ("**", InlineStyle::BOLD),
    ("*", InlineStyle::ITALIC),
    ("~~", InlineStyle::STRIKETHROUGH),
    ("==", InlineStyle::HIGHLIGHT),
];

const ESCAPE: char = '\\';

/// Split one line of raw text into styled runs.
///
/// Concatenating the `text` of the returned runs reproduces `text`. An empty
/// line yields a single empty plain run.
#[must_use]
pub fn tokenize(text: &str) -> Vec<StyledRun> {
    if text.is_empty() {
        return vec![StyledRun::default()];
    }

    let mut runs = Vec::new();
    let mut cursor = Cursor::default();
    while cursor.right < text.len() {
        cursor = cursor.step(text, &mut runs);
    }
    cursor.flush(text, &mut runs);
    runs
}

/// Scan state: pending plain text is `text[left..right]` (byte indices).
#[derive(Clone, Copy, Debug, Default)]
struct Cursor {
    left: usize,
    right: usize,
    style: InlineStyle,
}

impl Cursor {
    fn step(mut self, text: &str, runs: &mut Vec<StyledRun>) -> Self {
        let rest = &text[self.right..];

        if let Some(escaped) = rest.strip_prefix(ESCAPE) {
            self.flush(text, runs);
            runs.push(StyledRun::syntax(ESCAPE, self.style));
            let mut end = self.right + ESCAPE.len_utf8();
            if let Some(ch) = escaped.chars().next() {
                runs.push(StyledRun::plain(ch, self.style));
                end += ch.len_utf8();
            }
            return self.skip_to(end);
        }

        if let Some(&(delimiter, flag)) = DELIMITERS
            .iter()
            .find(|(delimiter, _)| rest.starts_with(delimiter))
        {
            self.flush(text, runs);
            runs.push(StyledRun::syntax(delimiter, self.style));
            self.style.toggle(flag);
            return self.skip_to(self.right + delimiter.len());
        }

        self.right += rest.chars().next().map_or(1, char::len_utf8);
        self
    }

    fn skip_to(mut self, idx: usize) -> Self {
        self.left = idx;
        self.right = idx;
        self
    }

    fn flush(&mut self, text: &str, runs: &mut Vec<StyledRun>) {
        if self.left < self.right {
            runs.push(StyledRun::plain(&text[self.left..self.right], self.style));
        }
        self.left = self.right;
    }
}
