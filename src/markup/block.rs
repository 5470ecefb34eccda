//! Block classification and the per-line render model.

use crate::markup::run::{InlineStyle, StyledRun};
use crate::markup::tokenize;
use crate::text::{Line, LineId};

/// Highest heading level a `#` prefix can express.
const MAX_LEVEL: u8 = 6;

/// Kind of block a line renders as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlockKind {
    #[default]
    Paragraph,
    /// Heading of level 1 (`# `) and up.
    Heading(u8),
}

impl BlockKind {
    /// Classify a line by its `#` prefix. Levels above `max_level` are
    /// paragraphs.
    #[must_use]
    pub fn classify(text: &str, max_level: u8) -> Self {
        let hashes = text.bytes().take_while(|&b| b == b'#').count();
        let max_level = max_level.min(MAX_LEVEL);
        match u8::try_from(hashes) {
            Ok(level) if (1..=max_level).contains(&level) && text[hashes..].starts_with(' ') => {
                Self::Heading(level)
            }
            _ => Self::Paragraph,
        }
    }

    /// Length in scalars of the syntax prefix (`"## "` is 3).
    #[must_use]
    pub fn prefix_len(self) -> usize {
        match self {
            Self::Paragraph => 0,
            Self::Heading(level) => usize::from(level) + 1,
        }
    }

    #[must_use]
    pub fn is_heading(self) -> bool {
        matches!(self, Self::Heading(_))
    }
}

/// How lines are turned into display text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Deepest heading level recognised (1..=6).
    pub max_heading_level: u8,
    /// Hide syntax runs on lines outside the focused range.
    pub hide_unfocused_syntax: bool,
    /// Render spaces as U+00A0 so hosts do not collapse them.
    pub non_breaking_spaces: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_heading_level: 3,
            hide_unfocused_syntax: true,
            non_breaking_spaces: true,
        }
    }
}

/// Render model of one line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedLine {
    /// Identity of the source line, for diffing.
    pub id: LineId,
    pub kind: BlockKind,
    /// Prefix run (for headings) followed by the body runs.
    pub runs: Vec<StyledRun>,
    /// Whether the line is inside the focused line range.
    pub focused: bool,
}

impl RenderedLine {
    /// Classify and tokenize `line`.
    #[must_use]
    pub fn new(line: &Line, focused: bool, options: &RenderOptions) -> Self {
        let text = line.text();
        let kind = BlockKind::classify(text, options.max_heading_level);
        let runs = match kind {
            BlockKind::Paragraph => tokenize(text),
            BlockKind::Heading(_) => {
                let (prefix, body) = text.split_at(kind.prefix_len());
                let mut runs = vec![StyledRun::syntax(prefix, InlineStyle::empty())];
                if !body.is_empty() {
                    runs.extend(tokenize(body));
                }
                runs
            }
        };
        Self {
            id: line.id(),
            kind,
            runs,
            focused,
        }
    }

    /// Whether syntax runs are displayed.
    #[must_use]
    pub fn shows_syntax(&self, options: &RenderOptions) -> bool {
        self.focused || !options.hide_unfocused_syntax
    }

    /// Display text of the whole line. Has as many scalars as the raw line.
    #[must_use]
    pub fn display_text(&self, options: &RenderOptions) -> String {
        let show = self.shows_syntax(options);
        self.runs
            .iter()
            .map(|run| run.display_text(show, options.non_breaking_spaces))
            .collect()
    }

    /// Raw text of the line.
    #[must_use]
    pub fn raw_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}
