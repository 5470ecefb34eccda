//! Event and log callback system.
//!
//! The editor session reports what it did through two process-wide callbacks:
//! an event callback receiving `(name, payload)` pairs such as
//! `("selection_changed", "{...}")`, and a log callback receiving diagnostic
//! messages. Both are no-ops until a host installs them.

use std::sync::{Mutex, OnceLock, PoisonError};

/// Log level for debug callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Event emitted after the buffer changed.
pub const CONTENT_CHANGED: &str = "content_changed";
/// Event emitted after the selection changed.
pub const SELECTION_CHANGED: &str = "selection_changed";

type EventCallback = Box<dyn Fn(&str, &str) + Send + Sync + 'static>;
type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

fn event_callback() -> &'static Mutex<Option<EventCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<EventCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global event callback.
///
/// The callback runs while the callback lock is held. It must not call
/// [`emit_event`] or [`set_event_callback`], or it deadlocks.
pub fn set_event_callback<F>(callback: F)
where
    F: Fn(&str, &str) + Send + Sync + 'static,
{
    let mut guard = event_callback()
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = Some(Box::new(callback));
}

/// Remove the global event callback.
pub fn clear_event_callback() {
    let mut guard = event_callback()
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = None;
}

/// Emit an event to the registered callback.
pub fn emit_event(name: &str, data: &str) {
    if let Ok(guard) = event_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(name, data);
        }
    }
}

/// Set the global log callback.
///
/// The callback runs while the callback lock is held. It must not call
/// [`emit_log`] or [`set_log_callback`], or it deadlocks.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    let mut guard = log_callback()
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = Some(Box::new(callback));
}

/// Remove the global log callback.
pub fn clear_log_callback() {
    let mut guard = log_callback()
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = None;
}

/// Emit a log event.
pub fn emit_log(level: LogLevel, message: &str) {
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    // Other unit tests emit events concurrently, so callbacks here only
    // record and the assertions look for this test's own messages.
    #[test]
    fn test_callbacks_receive_emitted_messages() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        set_event_callback(move |name, data| {
            sink.lock().unwrap().push(format!("{name}:{data}"));
        });
        emit_event("callback_test", "{}");
        assert!(events.lock().unwrap().contains(&"callback_test:{}".to_owned()));

        let logs = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&logs);
        set_log_callback(move |level, msg| {
            sink.lock().unwrap().push((level, msg.to_owned()));
        });
        emit_log(LogLevel::Info, "callback_test hello");
        assert!(
            logs.lock()
                .unwrap()
                .contains(&(LogLevel::Info, "callback_test hello".to_owned()))
        );
    }

    #[test]
    fn test_log_levels_order() {
        assert!(LogLevel::Debug < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }
}
