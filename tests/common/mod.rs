#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)] // Each test binary uses a subset

use std::sync::Once;

use richline::text::{LayoutMetrics, MonospaceLayout};
use richline::{Editor, Offset, Selection, TextBuffer};

pub fn setup_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// Editor over `lines` with a caret at `(line, column)`.
pub fn editor_at(lines: &[&str], line: usize, column: usize) -> Editor {
    let mut editor = Editor::new(TextBuffer::from_lines(lines.iter().copied()));
    editor.set_selection(Selection::collapsed(Offset::new(line, column)));
    editor
}

/// Monospace layout of the editor's current snapshot.
pub fn layout(editor: &Editor, wrap: usize) -> MonospaceLayout {
    MonospaceLayout::new(editor.buffer(), LayoutMetrics::wrapping_at(wrap))
}

pub fn texts(editor: &Editor) -> Vec<String> {
    editor
        .buffer()
        .lines()
        .map(|line| line.text().to_owned())
        .collect()
}
