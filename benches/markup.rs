//! Inline tokenizer and line rendering benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{Criterion, criterion_group, criterion_main};
use richline::TextBuffer;
use richline::markup::{RenderOptions, RenderedLine, tokenize};
use std::hint::black_box;

fn tokenize_lines(c: &mut Criterion) {
    c.bench_function("tokenize_plain_80", |b| {
        let line = "x".repeat(80);
        b.iter(|| tokenize(black_box(&line)));
    });

    c.bench_function("tokenize_markup_dense", |b| {
        let line = "a **bold** *it* ~~del~~ ==mark== \\* ".repeat(8);
        b.iter(|| tokenize(black_box(&line)));
    });

    c.bench_function("tokenize_hangul", |b| {
        let line = "텍스트 **편집기** ".repeat(10);
        b.iter(|| tokenize(black_box(&line)));
    });
}

fn render_document(c: &mut Criterion) {
    let text = (0..200)
        .map(|i| {
            if i % 10 == 0 {
                format!("## Section {i}")
            } else {
                format!("line {i} with **bold** and *italic* text")
            }
        })
        .collect::<Vec<_>>();
    let buffer = TextBuffer::from_lines(&text);
    let options = RenderOptions::default();

    c.bench_function("render_200_lines", |b| {
        b.iter(|| {
            black_box(&buffer)
                .lines()
                .enumerate()
                .map(|(idx, line)| RenderedLine::new(line, idx == 3, &options))
                .map(|line| line.display_text(&options))
                .count()
        });
    });
}

criterion_group!(benches, tokenize_lines, render_document);
criterion_main!(benches);
