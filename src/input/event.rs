//! Host input events.

use crate::input::keyboard::KeyEvent;

/// An input event delivered by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Keyboard event.
    Key(KeyEvent),
    /// Committed text input (typing, paste).
    Text(String),
    /// The live composition text changed.
    CompositionUpdate(String),
    /// The live composition was committed.
    CompositionEnd,
    /// Primary button pressed.
    MouseDown(PointerEvent),
    /// Pointer moved with the primary button held.
    MouseDrag(PointerEvent),
    /// The editor's viewport changed size.
    Resize(ResizeEvent),
    /// The editor lost focus.
    FocusLost,
}

impl Event {
    /// Check if this is a key event.
    #[must_use]
    pub fn is_key(&self) -> bool {
        matches!(self, Self::Key(_))
    }

    /// Check if this is part of a composition.
    #[must_use]
    pub fn is_composition(&self) -> bool {
        matches!(self, Self::CompositionUpdate(_) | Self::CompositionEnd)
    }

    /// Get the key event if this is one.
    #[must_use]
    pub fn key(&self) -> Option<&KeyEvent> {
        match self {
            Self::Key(e) => Some(e),
            _ => None,
        }
    }

    /// Get the pointer position if this is a mouse event.
    #[must_use]
    pub fn pointer(&self) -> Option<&PointerEvent> {
        match self {
            Self::MouseDown(e) | Self::MouseDrag(e) => Some(e),
            _ => None,
        }
    }
}

impl From<KeyEvent> for Event {
    fn from(e: KeyEvent) -> Self {
        Self::Key(e)
    }
}

impl From<ResizeEvent> for Event {
    fn from(e: ResizeEvent) -> Self {
        Self::Resize(e)
    }
}

/// Pointer position in host coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Viewport resize event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResizeEvent {
    /// New width in host units.
    pub width: f32,
    /// New height in host units.
    pub height: f32,
}

impl ResizeEvent {
    /// Create a new resize event.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
