//! Fuzz target for editor sessions.
//!
//! Drives an editor with arbitrary events over a monospace layout that is
//! rebuilt after every step, checking that the selection always fits the
//! buffer.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use richline::input::{Event, KeyCode, KeyEvent, KeyModifiers, PointerEvent};
use richline::text::{LayoutMetrics, MonospaceLayout};
use richline::{Editor, TextBuffer};

#[derive(Arbitrary, Debug)]
struct Session {
    initial: Vec<String>,
    wrap: u8,
    steps: Vec<Step>,
}

#[derive(Arbitrary, Debug)]
enum Step {
    Arrow { direction: u8, modifiers: u8 },
    Backspace,
    Enter,
    Text(String),
    Compose(String),
    CommitComposition,
    Click { x: u8, y: u8 },
    Drag { x: u8, y: u8 },
    Resize,
    Blur,
}

impl Step {
    fn into_event(self) -> Event {
        match self {
            Self::Arrow {
                direction,
                modifiers,
            } => {
                let code = match direction % 4 {
                    0 => KeyCode::Left,
                    1 => KeyCode::Right,
                    2 => KeyCode::Up,
                    _ => KeyCode::Down,
                };
                Event::Key(KeyEvent::new(
                    code,
                    KeyModifiers::from_bits_truncate(modifiers),
                ))
            }
            Self::Backspace => Event::Key(KeyEvent::key(KeyCode::Backspace)),
            Self::Enter => Event::Key(KeyEvent::key(KeyCode::Enter)),
            Self::Text(text) => Event::Text(text),
            Self::Compose(text) => Event::CompositionUpdate(text),
            Self::CommitComposition => Event::CompositionEnd,
            Self::Click { x, y } => Event::MouseDown(PointerEvent::new(f32::from(x), f32::from(y))),
            Self::Drag { x, y } => Event::MouseDrag(PointerEvent::new(f32::from(x), f32::from(y))),
            Self::Resize => Event::Resize(Default::default()),
            Self::Blur => Event::FocusLost,
        }
    }
}

fuzz_target!(|session: Session| {
    let mut editor = Editor::new(TextBuffer::from_lines(&session.initial));
    let metrics = LayoutMetrics::wrapping_at(usize::from(session.wrap % 32));

    for step in session.steps.into_iter().take(64) {
        let layout = MonospaceLayout::new(editor.buffer(), metrics);
        let _ = editor.handle_event(step.into_event(), &layout);

        let selection = editor.selection();
        assert!(selection.start() <= selection.end());
        assert!(editor.buffer().contains(selection.start()));
        assert!(editor.buffer().contains(selection.end()));
        assert!(editor.buffer().len_lines() >= 1);
    }
});
