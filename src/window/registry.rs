// GlTutor
// copyright gl_tutor developers 2024～2025

use crate::error::AppError;
use crate::event::WindowSignal;
use std::collections::HashMap;
use std::hash::Hash;

struct RegisteredWindow {
    title: String,
    signals: Vec<WindowSignal>,
}

/// Live windows keyed by their native id.
///
/// Owned by the `Platform`. OS events are queued here for the window they belong to
/// and drained by that window's run loop, whichever window happens to be pumping.
/// The windowing subsystem is shut down when the last registered window goes away.
pub struct WindowRegistry<K> {
    windows: HashMap<K, RegisteredWindow>,
}

impl<K: Eq + Hash + Copy> Default for WindowRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Copy> WindowRegistry<K> {
    pub fn new() -> Self {
        Self {
            windows: HashMap::new(),
        }
    }

    pub fn register(&mut self, id: K, title: &str) -> Result<(), AppError> {
        if self.windows.contains_key(&id) {
            return Err(AppError::DuplicateKey {
                kind: "window",
                key: title.to_string(),
            });
        }
        self.windows.insert(
            id,
            RegisteredWindow {
                title: title.to_string(),
                signals: Vec::new(),
            },
        );
        Ok(())
    }

    /// Returns how many windows are still alive
    pub fn deregister(&mut self, id: K) -> Result<usize, AppError> {
        match self.windows.remove(&id) {
            Some(_) => Ok(self.windows.len()),
            None => Err(AppError::MissingKey {
                kind: "window",
                key: "<unregistered>".to_string(),
            }),
        }
    }

    /// Queues a signal for window `id`; false if no such window is registered
    pub fn push_signal(&mut self, id: K, signal: WindowSignal) -> bool {
        match self.windows.get_mut(&id) {
            Some(window) => {
                window.signals.push(signal);
                true
            }
            None => false,
        }
    }

    /// Everything queued for `id` since the last call, oldest first
    pub fn take_signals(&mut self, id: K) -> Vec<WindowSignal> {
        self.windows
            .get_mut(&id)
            .map(|w| std::mem::take(&mut w.signals))
            .unwrap_or_default()
    }

    pub fn title(&self, id: K) -> Option<&str> {
        self.windows.get(&id).map(|w| w.title.as_str())
    }

    pub fn live_count(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_count() {
        let mut reg = WindowRegistry::new();
        reg.register(1u64, "first").unwrap();
        reg.register(2u64, "second").unwrap();
        assert_eq!(reg.live_count(), 2);
        assert_eq!(reg.title(2), Some("second"));
        assert_eq!(reg.title(3), None);
    }

    #[test]
    fn test_teardown_only_after_last() {
        let mut reg = WindowRegistry::new();
        reg.register(1u64, "a").unwrap();
        reg.register(2u64, "b").unwrap();
        assert_eq!(reg.deregister(2).unwrap(), 1);
        assert!(!reg.is_empty());
        assert_eq!(reg.deregister(1).unwrap(), 0);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_duplicate_and_unknown_ids() {
        let mut reg = WindowRegistry::new();
        reg.register(7u64, "a").unwrap();
        assert!(matches!(
            reg.register(7, "again"),
            Err(AppError::DuplicateKey { kind: "window", .. })
        ));
        assert!(reg.deregister(8).is_err());
        // a failed deregister leaves the live count alone
        assert_eq!(reg.live_count(), 1);
    }

    #[test]
    fn test_signals_reach_their_own_window() {
        let mut reg = WindowRegistry::new();
        reg.register(1u64, "a").unwrap();
        reg.register(2u64, "b").unwrap();

        // events for b arrive while a is the one pumping
        assert!(reg.push_signal(2, WindowSignal::Resized { width: 640, height: 480 }));
        assert!(reg.push_signal(1, WindowSignal::FocusLost));
        assert!(reg.push_signal(2, WindowSignal::CloseRequested));

        assert_eq!(reg.take_signals(1), vec![WindowSignal::FocusLost]);
        assert_eq!(
            reg.take_signals(2),
            vec![
                WindowSignal::Resized { width: 640, height: 480 },
                WindowSignal::CloseRequested
            ]
        );
        // drained
        assert!(reg.take_signals(2).is_empty());
    }

    #[test]
    fn test_signals_for_unknown_window_dropped() {
        let mut reg = WindowRegistry::new();
        reg.register(1u64, "a").unwrap();
        assert!(!reg.push_signal(9, WindowSignal::CloseRequested));
        assert!(reg.take_signals(9).is_empty());
        assert!(reg.take_signals(1).is_empty());

        reg.push_signal(1, WindowSignal::CloseRequested);
        reg.deregister(1).unwrap();
        // queue goes away with the window
        assert!(reg.take_signals(1).is_empty());
    }
}
