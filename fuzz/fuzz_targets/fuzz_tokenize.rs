//! Fuzz target for the inline markup tokenizer.
//!
//! Runs must reproduce the input and hidden-syntax rendering must keep one
//! scalar per raw scalar.

#![no_main]

use libfuzzer_sys::fuzz_target;
use richline::TextBuffer;
use richline::markup::{RenderOptions, RenderedLine, tokenize};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let line = text.replace('\n', "");

    let runs = tokenize(&line);
    let joined: String = runs.iter().map(|run| run.text.as_str()).collect();
    assert_eq!(joined, line);

    let buffer = TextBuffer::from_lines([line.as_str()]);
    let options = RenderOptions::default();
    if let Some(raw) = buffer.line(0) {
        let rendered = RenderedLine::new(raw, false, &options);
        assert_eq!(rendered.display_text(&options).chars().count(), raw.len());
    }
});
