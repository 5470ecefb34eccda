//! Editor session: one buffer snapshot, its selection, and the state that
//! lives across intents.
//!
//! [`Editor`] processes exactly one intent at a time. Every step replaces the
//! buffer snapshot and the selection wholesale, so a host can keep rendering a
//! cloned snapshot while the next intent runs.
//!
//! # Examples
//!
//! ```
//! use richline::input::{Event, KeyCode, KeyEvent};
//! use richline::text::{LayoutMetrics, MonospaceLayout};
//! use richline::{Editor, Offset, Selection, TextBuffer};
//!
//! let mut editor = Editor::new(TextBuffer::from_lines(["abc", "de"]));
//! editor.set_selection(Selection::collapsed(Offset::new(0, 3)));
//!
//! let layout = MonospaceLayout::new(editor.buffer(), LayoutMetrics::default());
//! editor
//!     .handle_event(Event::Key(KeyEvent::key(KeyCode::Backspace)), &layout)
//!     .unwrap();
//! assert_eq!(editor.buffer().text(), "ab\nde");
//! assert_eq!(editor.selection(), Selection::collapsed(Offset::new(0, 2)));
//! ```

use crate::error::Result;
use crate::event::{CONTENT_CHANGED, LogLevel, SELECTION_CHANGED, emit_event, emit_log};
use crate::input::{Event, Intent, NavIntent};
use crate::markup::{RenderOptions, RenderedLine};
use crate::text::caret::{CaretNavigator, Direction, VerticalCaretMemory};
use crate::text::edit::EditIntent;
use crate::text::geometry::{GeometryProvider, Rect};
use crate::text::{Selection, TextBuffer};

/// Editor configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditorOptions {
    /// Enter with a range selected deletes the range and splits. When off,
    /// Enter with a range selected does nothing.
    pub enter_replaces_selection: bool,
    /// Deepest heading level recognised (1..=6).
    pub max_heading_level: u8,
    /// Hide markup syntax on lines outside the focused range.
    pub hide_unfocused_syntax: bool,
    /// Render spaces as non-breaking spaces.
    pub non_breaking_spaces: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        let render = RenderOptions::default();
        Self {
            enter_replaces_selection: true,
            max_heading_level: render.max_heading_level,
            hide_unfocused_syntax: render.hide_unfocused_syntax,
            non_breaking_spaces: render.non_breaking_spaces,
        }
    }
}

impl EditorOptions {
    /// The subset of options used to render lines.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            max_heading_level: self.max_heading_level,
            hide_unfocused_syntax: self.hide_unfocused_syntax,
            non_breaking_spaces: self.non_breaking_spaces,
        }
    }
}

/// State of an in-progress IME composition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Composition {
    active: bool,
    len: usize,
}

impl Composition {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Length in scalars of the live composition text before the caret.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Caret rectangles of both selection ends.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SelectionGeometry {
    pub start: Rect,
    pub end: Rect,
    pub collapsed: bool,
}

/// An editing session over one document.
#[derive(Clone, Debug)]
pub struct Editor {
    buffer: TextBuffer,
    selection: Selection,
    memory: VerticalCaretMemory,
    composition: Composition,
    focused: bool,
    options: EditorOptions,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(TextBuffer::new())
    }
}

impl Editor {
    /// Create a session with the caret at the document start.
    #[must_use]
    pub fn new(buffer: TextBuffer) -> Self {
        Self::with_options(buffer, EditorOptions::default())
    }

    #[must_use]
    pub fn with_options(buffer: TextBuffer, options: EditorOptions) -> Self {
        Self {
            buffer,
            selection: Selection::default(),
            memory: VerticalCaretMemory::default(),
            composition: Composition::default(),
            focused: true,
            options,
        }
    }

    /// Current buffer snapshot.
    #[must_use]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    #[must_use]
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: EditorOptions) {
        self.options = options;
    }

    #[must_use]
    pub fn composition(&self) -> Composition {
        self.composition
    }

    #[must_use]
    pub fn vertical_memory(&self) -> VerticalCaretMemory {
        self.memory
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Replace the document. The selection is clamped into the new buffer.
    pub fn set_buffer(&mut self, buffer: TextBuffer) {
        self.buffer = buffer;
        self.memory.clear();
        self.composition = Composition::default();
        emit_event(CONTENT_CHANGED, &self.content_payload());
        self.update_selection(self.selection.clamp(&self.buffer));
    }

    /// Replace the selection, clamped into the buffer.
    pub fn set_selection(&mut self, selection: Selection) {
        self.memory.clear();
        self.commit_composition();
        self.update_selection(selection.clamp(&self.buffer));
    }

    /// Process one host event.
    ///
    /// Key events are ignored while a composition is active; the IME owns
    /// the keyboard until it commits.
    pub fn handle_event<G>(&mut self, event: Event, geometry: &G) -> Result<()>
    where
        G: GeometryProvider + ?Sized,
    {
        match event {
            Event::Key(key) => {
                if self.composition.active {
                    emit_log(LogLevel::Debug, "key ignored during composition");
                    return Ok(());
                }
                match Intent::from_key(&key) {
                    Some(intent) => self.apply(intent, geometry),
                    None => Ok(()),
                }
            }
            Event::Text(text) => self.edit(EditIntent::InsertChar(text)),
            Event::CompositionUpdate(data) => self.edit(EditIntent::CompositionUpdate {
                data,
                previous_len: self.composition.len,
            }),
            Event::CompositionEnd => self.edit(EditIntent::CompositionEnd),
            Event::MouseDown(pointer) => {
                self.click(pointer.x, pointer.y, geometry);
                Ok(())
            }
            Event::MouseDrag(pointer) => {
                self.drag(pointer.x, pointer.y, geometry);
                Ok(())
            }
            Event::Resize(_) => {
                self.invalidate_layout();
                Ok(())
            }
            Event::FocusLost => {
                self.blur();
                Ok(())
            }
        }
    }

    /// Process one intent.
    pub fn apply<G>(&mut self, intent: Intent, geometry: &G) -> Result<()>
    where
        G: GeometryProvider + ?Sized,
    {
        match intent {
            Intent::Navigate(nav) => {
                self.navigate(nav, geometry);
                Ok(())
            }
            Intent::Edit(edit) => self.edit(edit),
        }
    }

    /// Move the caret or extend the selection.
    ///
    /// Plain Left/Up start from the start of a selected range and Right/Down
    /// from its end; with `extend` the focus end moves. Starting offsets the
    /// geometry cannot classify leave the selection unchanged.
    pub fn navigate<G>(&mut self, intent: NavIntent, geometry: &G) -> Selection
    where
        G: GeometryProvider + ?Sized,
    {
        if !intent.is_vertical_step() {
            self.memory.clear();
        }

        let from = if intent.extend {
            self.selection.focus()
        } else {
            match intent.direction {
                Direction::Left | Direction::Up => self.selection.start(),
                Direction::Right | Direction::Down => self.selection.end(),
            }
        };

        let navigator = CaretNavigator::new(&self.buffer, geometry);
        let target = match navigator.step(from, intent.direction, intent.jump, &mut self.memory) {
            Ok(target) => target,
            Err(err) => {
                emit_log(LogLevel::Warn, &format!("navigation ignored: {err}"));
                return self.selection;
            }
        };

        let next = if intent.extend {
            self.selection.move_focus_to(target)
        } else {
            Selection::collapsed(target)
        };
        self.commit_composition();
        self.update_selection(next);
        self.selection
    }

    /// Apply an edit intent to the current snapshot.
    ///
    /// Structural errors leave the session untouched and are returned.
    pub fn edit(&mut self, intent: EditIntent) -> Result<()> {
        self.memory.clear();

        if intent == EditIntent::Enter
            && !self.options.enter_replaces_selection
            && !self.selection.is_collapsed()
        {
            emit_log(LogLevel::Debug, "enter with a selected range ignored");
            return Ok(());
        }

        let outcome = match intent.apply(&self.buffer, self.selection) {
            Ok(outcome) => outcome,
            Err(err) => {
                emit_log(LogLevel::Error, &format!("edit rejected: {err}"));
                return Err(err);
            }
        };

        self.composition = match intent {
            EditIntent::CompositionUpdate { .. } => Composition {
                active: true,
                len: outcome.composition_len,
            },
            _ => Composition::default(),
        };

        if outcome.buffer != self.buffer {
            self.buffer = outcome.buffer;
            emit_event(CONTENT_CHANGED, &self.content_payload());
        }
        self.update_selection(outcome.selection);
        Ok(())
    }

    /// Place the caret at the offset closest to a point and take focus.
    pub fn click<G>(&mut self, x: f32, y: f32, geometry: &G) -> Selection
    where
        G: GeometryProvider + ?Sized,
    {
        self.memory.clear();
        self.focused = true;
        let offset = self.buffer.clamp(geometry.offset_at_point(x, y));
        self.commit_composition();
        self.update_selection(Selection::collapsed(offset));
        self.selection
    }

    /// Extend the selection's focus end to the offset closest to a point.
    pub fn drag<G>(&mut self, x: f32, y: f32, geometry: &G) -> Selection
    where
        G: GeometryProvider + ?Sized,
    {
        self.memory.clear();
        let offset = self.buffer.clamp(geometry.offset_at_point(x, y));
        self.commit_composition();
        self.update_selection(self.selection.move_focus_to(offset));
        self.selection
    }

    /// Drop focus. Unfocused sessions report no focused line range.
    pub fn blur(&mut self) {
        self.memory.clear();
        self.focused = false;
    }

    /// Forget geometry-derived state after the host layout changed.
    pub fn invalidate_layout(&mut self) {
        self.memory.clear();
    }

    /// Caret rectangles of both selection ends.
    #[must_use]
    pub fn selection_geometry<G>(&self, geometry: &G) -> SelectionGeometry
    where
        G: GeometryProvider + ?Sized,
    {
        let (start, end) = self.selection.normalize();
        SelectionGeometry {
            start: geometry.rect_for_offset(start),
            end: geometry.rect_for_offset(end),
            collapsed: self.selection.is_collapsed(),
        }
    }

    /// Lines touched by the selection while the session has focus.
    #[must_use]
    pub fn focus_range(&self) -> Option<(usize, usize)> {
        self.focused.then(|| self.selection.line_span())
    }

    /// Render model of every line.
    #[must_use]
    pub fn render_lines(&self) -> Vec<RenderedLine> {
        let options = self.options.render_options();
        let focus = self.focus_range();
        self.buffer
            .lines()
            .enumerate()
            .map(|(idx, line)| {
                let focused = focus.is_some_and(|(first, last)| first <= idx && idx <= last);
                RenderedLine::new(line, focused, &options)
            })
            .collect()
    }

    /// Keep the live composition text as typed. The next update starts a
    /// new composition at the caret.
    fn commit_composition(&mut self) {
        if self.composition.active {
            emit_log(LogLevel::Debug, "composition committed by caret move");
            self.composition = Composition::default();
        }
    }

    fn update_selection(&mut self, selection: Selection) {
        if selection != self.selection {
            self.selection = selection;
            emit_event(SELECTION_CHANGED, &self.selection_payload());
        }
    }

    fn content_payload(&self) -> String {
        format!("{{\"lines\":{}}}", self.buffer.len_lines())
    }

    fn selection_payload(&self) -> String {
        let (start, end) = self.selection.normalize();
        format!(
            "{{\"start\":[{},{}],\"end\":[{},{}],\"collapsed\":{}}}",
            start.line,
            start.column,
            end.line,
            end.column,
            self.selection.is_collapsed()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyCode, KeyEvent, KeyModifiers, PointerEvent};
    use crate::markup::BlockKind;
    use crate::text::Offset;
    use crate::text::geometry::{Container, LayoutMetrics, MonospaceLayout};

    fn at(line: usize, column: usize) -> Offset {
        Offset::new(line, column)
    }

    fn editor_at(lines: &[&str], caret: Offset) -> Editor {
        let mut editor = Editor::new(TextBuffer::from_lines(lines.iter().copied()));
        editor.set_selection(Selection::collapsed(caret));
        editor
    }

    fn layout(editor: &Editor, wrap: usize) -> MonospaceLayout {
        MonospaceLayout::new(editor.buffer(), LayoutMetrics::wrapping_at(wrap))
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_plain_arrows_collapse_from_range_ends() {
        let mut editor = editor_at(&["abcdef"], at(0, 0));
        let geo = layout(&editor, 80);
        editor.set_selection(Selection::new(at(0, 2), at(0, 4)));

        editor.navigate(NavIntent::step(Direction::Left), &geo);
        assert_eq!(editor.selection(), Selection::collapsed(at(0, 1)));

        editor.set_selection(Selection::new(at(0, 2), at(0, 4)));
        editor.navigate(NavIntent::step(Direction::Right), &geo);
        assert_eq!(editor.selection(), Selection::collapsed(at(0, 5)));
    }

    #[test]
    fn test_shift_arrows_extend_focus() {
        let mut editor = editor_at(&["abcdef"], at(0, 3));
        let geo = layout(&editor, 80);
        let left = NavIntent::step(Direction::Left).extending();
        let right = NavIntent::step(Direction::Right).extending();

        editor.navigate(left, &geo);
        editor.navigate(left, &geo);
        assert_eq!(editor.selection().normalize(), (at(0, 1), at(0, 3)));
        editor.navigate(right, &geo);
        assert_eq!(editor.selection().normalize(), (at(0, 2), at(0, 3)));
        editor.navigate(right, &geo);
        assert!(editor.selection().is_collapsed());
        editor.navigate(right, &geo);
        assert_eq!(editor.selection().normalize(), (at(0, 3), at(0, 4)));
    }

    #[test]
    fn test_vertical_memory_lifecycle() {
        let mut editor = editor_at(&["abcdefgh", "ab", "abcdefgh"], at(0, 6));
        let geo = layout(&editor, 80);
        let down = NavIntent::step(Direction::Down);

        editor.navigate(down, &geo);
        assert_eq!(editor.selection().start(), at(1, 2));
        assert!(editor.vertical_memory().is_cached());
        editor.navigate(down, &geo);
        assert_eq!(editor.selection().start(), at(2, 6));

        editor.navigate(NavIntent::step(Direction::Left), &geo);
        assert!(!editor.vertical_memory().is_cached());

        editor.navigate(down, &geo);
        assert!(editor.vertical_memory().is_cached());
        editor.invalidate_layout();
        assert!(!editor.vertical_memory().is_cached());
    }

    #[test]
    fn test_meta_jumps() {
        let mut editor = editor_at(&["abcdefghij12345", "xy"], at(0, 12));
        let geo = layout(&editor, 10);

        editor.navigate(NavIntent::step(Direction::Left).jumping(), &geo);
        assert_eq!(editor.selection().start(), at(0, 10));
        editor.navigate(NavIntent::step(Direction::Down).jumping(), &geo);
        assert_eq!(editor.selection().start(), at(1, 2));
        editor.navigate(
            NavIntent::step(Direction::Up).jumping().extending(),
            &geo,
        );
        assert_eq!(editor.selection().normalize(), (at(0, 0), at(1, 2)));
    }

    struct Opaque;

    impl GeometryProvider for Opaque {
        fn container_at(&self, _offset: Offset) -> Container {
            Container::Unknown
        }

        fn rect_for_offset(&self, _offset: Offset) -> Rect {
            Rect::default()
        }

        fn offset_at_point(&self, _x: f32, _y: f32) -> Offset {
            Offset::zero()
        }
    }

    #[test]
    fn test_invalid_geometry_is_no_movement() {
        let mut editor = editor_at(&["abc", "de"], at(0, 1));
        let before = editor.selection();
        editor.navigate(NavIntent::step(Direction::Down), &Opaque);
        assert_eq!(editor.selection(), before);
        editor.navigate(NavIntent::step(Direction::Right), &Opaque);
        assert_eq!(editor.selection(), Selection::collapsed(at(0, 2)));
    }

    #[test]
    fn test_keys_ignored_while_composing() {
        let mut editor = editor_at(&["a"], at(0, 1));
        let geo = layout(&editor, 80);

        editor
            .handle_event(Event::CompositionUpdate("ㅎ".to_owned()), &geo)
            .unwrap();
        assert!(editor.composition().is_active());
        editor
            .handle_event(Event::CompositionUpdate("하".to_owned()), &geo)
            .unwrap();
        assert_eq!(editor.buffer().text(), "a하");

        editor
            .handle_event(key(KeyCode::Backspace, KeyModifiers::empty()), &geo)
            .unwrap();
        assert_eq!(editor.buffer().text(), "a하");

        editor.handle_event(Event::CompositionEnd, &geo).unwrap();
        assert!(!editor.composition().is_active());
        editor
            .handle_event(key(KeyCode::Backspace, KeyModifiers::empty()), &geo)
            .unwrap();
        assert_eq!(editor.buffer().text(), "a");
    }

    #[test]
    fn test_click_commits_composition() {
        let mut editor = editor_at(&["axyz"], at(0, 1));
        let geo = layout(&editor, 80);
        editor
            .handle_event(Event::CompositionUpdate("ㅎ".to_owned()), &geo)
            .unwrap();
        assert_eq!(editor.buffer().text(), "aㅎxyz");

        let geo = layout(&editor, 80);
        editor
            .handle_event(Event::MouseDown(PointerEvent::new(0.0, 0.5)), &geo)
            .unwrap();
        assert_eq!(editor.selection(), Selection::collapsed(at(0, 0)));
        assert!(!editor.composition().is_active());

        editor
            .handle_event(Event::CompositionUpdate("하".to_owned()), &geo)
            .unwrap();
        assert_eq!(editor.buffer().text(), "하aㅎxyz");
        assert_eq!(editor.selection(), Selection::collapsed(at(0, 1)));
    }

    #[test]
    fn test_navigation_commits_composition() {
        let mut editor = editor_at(&["abc"], at(0, 3));
        let geo = layout(&editor, 80);
        editor
            .edit(EditIntent::CompositionUpdate {
                data: "ㄱ".to_owned(),
                previous_len: 0,
            })
            .unwrap();

        editor.navigate(NavIntent::step(Direction::Left), &geo);
        assert_eq!(editor.selection(), Selection::collapsed(at(0, 3)));
        assert!(!editor.composition().is_active());

        editor
            .handle_event(Event::CompositionUpdate("ㄴ".to_owned()), &geo)
            .unwrap();
        assert_eq!(editor.buffer().text(), "abcㄴㄱ");
    }

    #[test]
    fn test_line_break_in_composition_keeps_preview_live() {
        let mut editor = editor_at(&["ab"], at(0, 2));
        let geo = layout(&editor, 80);
        editor
            .handle_event(Event::CompositionUpdate("x".to_owned()), &geo)
            .unwrap();
        assert!(
            editor
                .handle_event(Event::CompositionUpdate("x\ny".to_owned()), &geo)
                .is_err()
        );
        assert_eq!(editor.composition().len(), 1);

        editor
            .handle_event(Event::CompositionUpdate("z".to_owned()), &geo)
            .unwrap();
        assert_eq!(editor.buffer().text(), "abz");
    }

    #[test]
    fn test_enter_with_range_respects_option() {
        let mut editor = editor_at(&["abcdef"], at(0, 0));
        editor.set_selection(Selection::new(at(0, 1), at(0, 4)));
        editor.set_options(EditorOptions {
            enter_replaces_selection: false,
            ..EditorOptions::default()
        });
        editor.edit(EditIntent::Enter).unwrap();
        assert_eq!(editor.buffer().text(), "abcdef");

        editor.set_options(EditorOptions::default());
        editor.edit(EditIntent::Enter).unwrap();
        assert_eq!(editor.buffer().text(), "a\nef");
        assert_eq!(editor.selection(), Selection::collapsed(at(1, 0)));
    }

    #[test]
    fn test_failed_edit_leaves_session_untouched() {
        let mut editor = editor_at(&["ab"], at(0, 2));
        let err = editor
            .edit(EditIntent::CompositionUpdate {
                data: "x".to_owned(),
                previous_len: 5,
            })
            .unwrap_err();
        assert!(err.is_out_of_range());
        assert_eq!(editor.buffer().text(), "ab");
        assert!(!editor.composition().is_active());
    }

    #[test]
    fn test_click_drag_and_blur() {
        let mut editor = editor_at(&["abc", "de"], at(0, 0));
        let geo = layout(&editor, 80);

        editor
            .handle_event(Event::MouseDown(PointerEvent::new(2.2, 0.5)), &geo)
            .unwrap();
        assert_eq!(editor.selection(), Selection::collapsed(at(0, 2)));
        editor
            .handle_event(Event::MouseDrag(PointerEvent::new(1.0, 1.5)), &geo)
            .unwrap();
        assert_eq!(editor.selection().normalize(), (at(0, 2), at(1, 1)));
        assert_eq!(editor.focus_range(), Some((0, 1)));

        editor.handle_event(Event::FocusLost, &geo).unwrap();
        assert!(!editor.is_focused());
        assert_eq!(editor.focus_range(), None);
    }

    #[test]
    fn test_selection_geometry() {
        let mut editor = editor_at(&["abc", "de"], at(0, 0));
        let geo = layout(&editor, 80);
        editor.set_selection(Selection::new(at(1, 1), at(0, 2)));
        let rects = editor.selection_geometry(&geo);
        assert_eq!(rects.start, Rect::new(2.0, 0.0, 1.0));
        assert_eq!(rects.end, Rect::new(1.0, 1.0, 1.0));
        assert!(!rects.collapsed);
    }

    #[test]
    fn test_render_lines_marks_focused_range() {
        let editor = editor_at(&["# title", "**x**", "plain"], at(1, 1));
        let lines = editor.render_lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].kind, BlockKind::Heading(1));
        assert!(!lines[0].focused);
        assert!(lines[1].focused);
        assert_eq!(lines[1].id, editor.buffer().line(1).unwrap().id());
    }

    #[test]
    fn test_set_buffer_clamps_selection() {
        let mut editor = editor_at(&["abcdef", "gh"], at(1, 2));
        editor.set_buffer(TextBuffer::from_lines(["xy"]));
        assert_eq!(editor.selection(), Selection::collapsed(at(0, 2)));
    }
}
