//! Rotating status line shown while a lookup is outstanding.
//!
//! The announcer never owns a timer. It only holds a cursor into a fixed
//! script; whoever owns the clock calls [`ProgressAnnouncer::tick`]. This
//! keeps it testable without wall-clock waits.

use std::time::Duration;

use crate::LookupError;

/// Time between two advances of the status script.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1500);

/// A single line of the status script, optionally with a highlighted tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub emphasis: Option<String>,
}

impl StatusMessage {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: None,
        }
    }

    pub fn emphasised(text: impl Into<String>, emphasis: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: Some(emphasis.into()),
        }
    }
}

impl std::fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.emphasis {
            Some(emphasis) => write!(f, "{} {}", self.text, emphasis),
            None => f.write_str(&self.text),
        }
    }
}

/// Ordered, non-empty status script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessageSequence {
    messages: Vec<StatusMessage>,
}

impl StatusMessageSequence {
    pub fn new(messages: Vec<StatusMessage>) -> Result<Self, LookupError> {
        if messages.is_empty() {
            return Err(LookupError::EmptySequence);
        }
        Ok(Self { messages })
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, index: usize) -> &StatusMessage {
        &self.messages[index.min(self.last_index())]
    }

    fn last_index(&self) -> usize {
        self.messages.len() - 1
    }
}

impl Default for StatusMessageSequence {
    fn default() -> Self {
        Self {
            messages: vec![
                StatusMessage::plain("Reading your shelf..."),
                StatusMessage::plain("Looking up each book in the library catalog..."),
                StatusMessage::plain("Checking which copies are on the shelf at your branch..."),
                StatusMessage::emphasised(
                    "The catalog is slow today.",
                    "Hang tight, this can take a while.",
                ),
                StatusMessage::plain("Fetching call numbers for the books we found..."),
                StatusMessage::emphasised("Almost there.", "Still working on it."),
            ],
        }
    }
}

/// Cursor over a [`StatusMessageSequence`].
///
/// `cursor` is `None` while stopped. Once started it only moves forward and
/// holds at the final message instead of wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressAnnouncer {
    sequence: StatusMessageSequence,
    cursor: Option<usize>,
}

impl ProgressAnnouncer {
    pub fn new(sequence: StatusMessageSequence) -> Self {
        Self {
            sequence,
            cursor: None,
        }
    }

    pub fn start(&mut self) {
        self.cursor = Some(0);
    }

    /// Advances by one, clamped at the last message. Returns whether the
    /// visible message changed. Ticks while stopped are ignored.
    pub fn tick(&mut self) -> bool {
        let Some(cursor) = self.cursor else {
            return false;
        };
        let next = (cursor + 1).min(self.sequence.last_index());
        self.cursor = Some(next);
        next != cursor
    }

    pub fn stop(&mut self) {
        self.cursor = None;
    }

    pub fn is_running(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.cursor.map(|index| self.sequence.get(index))
    }

    pub fn sequence(&self) -> &StatusMessageSequence {
        &self.sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(n: usize) -> StatusMessageSequence {
        StatusMessageSequence::new((0..n).map(|i| StatusMessage::plain(format!("m{i}"))).collect())
            .unwrap()
    }

    #[test]
    fn empty_sequence_is_rejected() {
        assert_eq!(
            StatusMessageSequence::new(Vec::new()),
            Err(LookupError::EmptySequence)
        );
    }

    #[test]
    fn start_shows_first_message() {
        let mut announcer = ProgressAnnouncer::new(script(3));
        assert_eq!(announcer.current(), None);
        announcer.start();
        assert_eq!(announcer.cursor(), Some(0));
        assert_eq!(announcer.current().unwrap().text, "m0");
    }

    #[test]
    fn ticks_clamp_at_last_message() {
        let mut announcer = ProgressAnnouncer::new(script(3));
        announcer.start();
        for n in 1..=10 {
            let changed = announcer.tick();
            assert_eq!(changed, n < 3);
            let expected = format!("m{}", n.min(2));
            assert_eq!(announcer.current().unwrap().text, expected);
        }
    }

    #[test]
    fn single_message_script_never_changes() {
        let mut announcer = ProgressAnnouncer::new(script(1));
        announcer.start();
        assert!(!announcer.tick());
        assert_eq!(announcer.cursor(), Some(0));
    }

    #[test]
    fn ticks_after_stop_are_silent() {
        let mut announcer = ProgressAnnouncer::new(script(4));
        announcer.start();
        announcer.tick();
        announcer.stop();
        for _ in 0..5 {
            assert!(!announcer.tick());
        }
        assert_eq!(announcer.current(), None);
        assert!(!announcer.is_running());
    }

    #[test]
    fn restart_resets_cursor() {
        let mut announcer = ProgressAnnouncer::new(script(4));
        announcer.start();
        announcer.tick();
        announcer.tick();
        announcer.stop();
        announcer.start();
        assert_eq!(announcer.cursor(), Some(0));
    }

    #[test]
    fn emphasis_is_rendered_after_text() {
        let message = StatusMessage::emphasised("Almost there.", "Still working.");
        assert_eq!(message.to_string(), "Almost there. Still working.");
    }
}
