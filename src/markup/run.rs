//! Styled runs produced by the inline tokenizer.

use bitflags::bitflags;

/// Zero-width space used in place of hidden syntax.
const HIDDEN: char = '\u{200B}';
const NO_BREAK_SPACE: char = '\u{00A0}';

bitflags! {
    /// Inline style flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct InlineStyle: u8 {
        /// `**bold**`
        const BOLD = 0b0000_0001;
        /// `*italic*`
        const ITALIC = 0b0000_0010;
        /// `~~strikethrough~~`
        const STRIKETHROUGH = 0b0000_0100;
        /// `==highlight==`
        const HIGHLIGHT = 0b0000_1000;
    }
}

/// A maximal piece of a line rendered with one style.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StyledRun {
    pub text: String,
    /// Delimiter or escape characters, hidden unless the line is focused.
    pub syntax: bool,
    pub style: InlineStyle,
}

impl StyledRun {
    #[must_use]
    pub fn plain(text: impl Into<String>, style: InlineStyle) -> Self {
        Self {
            text: text.into(),
            syntax: false,
            style,
        }
    }

    #[must_use]
    pub fn syntax(text: impl Into<String>, style: InlineStyle) -> Self {
        Self {
            text: text.into(),
            syntax: true,
            style,
        }
    }

    #[must_use]
    pub fn bold(&self) -> bool {
        self.style.contains(InlineStyle::BOLD)
    }

    #[must_use]
    pub fn italic(&self) -> bool {
        self.style.contains(InlineStyle::ITALIC)
    }

    #[must_use]
    pub fn strikethrough(&self) -> bool {
        self.style.contains(InlineStyle::STRIKETHROUGH)
    }

    #[must_use]
    pub fn highlight(&self) -> bool {
        self.style.contains(InlineStyle::HIGHLIGHT)
    }

    /// Length in Unicode scalar values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text as displayed.
    ///
    /// Hidden syntax becomes one zero-width space per scalar, so the displayed
    /// text always has as many scalars as the raw text and caret offsets map
    /// one to one.
    #[must_use]
    pub fn display_text(&self, show_syntax: bool, non_breaking_spaces: bool) -> String {
        if self.syntax && !show_syntax {
            return self.text.chars().map(|_| HIDDEN).collect();
        }
        if non_breaking_spaces {
            self.text
                .chars()
                .map(|ch| if ch == ' ' { NO_BREAK_SPACE } else { ch })
                .collect()
        } else {
            self.text.clone()
        }
    }
}
