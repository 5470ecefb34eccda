//! Host input events and their translation into editor intents.
//!
//! Hosts capture keyboard, IME, and pointer input themselves and hand the
//! editor one [`Event`] at a time.

mod event;
mod intent;
mod keyboard;

pub use event::{Event, PointerEvent, ResizeEvent};
pub use intent::{Intent, NavIntent};
pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
