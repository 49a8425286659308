use std::sync::Mutex;
use crate::traits::{Navigator, Notifier};

/// Keeps every message so a caller can replay or inspect them later
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    successes: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().map(|m| m.clone()).unwrap_or_default()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        if let Ok(mut successes) = self.successes.lock() {
            successes.push(message.to_string());
        }
    }

    fn error(&self, message: &str) {
        if let Ok(mut errors) = self.errors.lock() {
            errors.push(message.to_string());
        }
    }
}

/// Remembers the last navigation request; the CLI acts on it once a command finishes
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    last: Mutex<Option<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending navigation target, leaving none behind
    pub fn take(&self) -> Option<String> {
        self.last.lock().ok().and_then(|mut last| last.take())
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_by_url(&self, url: &str) {
        if let Ok(mut last) = self.last.lock() {
            *last = Some(url.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_navigator_take_clears() {
        let navigator = RecordingNavigator::new();
        navigator.navigate_by_url("/films/1");
        navigator.navigate_by_url("/films");
        assert_eq!(navigator.take(), Some("/films".to_string()));
        assert_eq!(navigator.take(), None);
    }

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.success("one");
        notifier.error("bad");
        notifier.success("two");
        assert_eq!(notifier.successes(), vec!["one", "two"]);
        assert_eq!(notifier.errors(), vec!["bad"]);
    }
}
