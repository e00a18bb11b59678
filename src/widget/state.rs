//! In-memory widget state.
//!
//! [`WidgetState`] is the [`ChatView`] the page server renders from: one per
//! visitor session. Clones share the same underlying state.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::message::{Message, SubmissionId, TranscriptEntry};
use super::panel::PanelVisibility;
use super::transcript::Transcript;
use super::view::ChatView;

#[derive(Debug, Clone, Default)]
pub struct WidgetState {
    inner: Arc<RwLock<WidgetInner>>,
}

#[derive(Debug, Default)]
struct WidgetInner {
    panel: PanelVisibility,
    transcript: Transcript,
    input: String,
    /// Transcript length at the last scroll-to-bottom.
    scrolled_to: usize,
}

/// Point-in-time copy of the widget, for rendering outside the lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSnapshot {
    pub panel: PanelVisibility,
    pub entries: Vec<TranscriptEntry>,
    pub input: String,
    pub scrolled_to_bottom: bool,
}

impl WidgetState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, WidgetInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, WidgetInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the input field contents, as typing would.
    pub fn set_input(&self, text: impl Into<String>) {
        self.write().input = text.into();
    }

    #[must_use]
    pub fn panel(&self) -> PanelVisibility {
        self.read().panel
    }

    #[must_use]
    pub fn transcript(&self) -> Transcript {
        self.read().transcript.clone()
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.read().transcript.pending_count()
    }

    #[must_use]
    pub fn snapshot(&self) -> WidgetSnapshot {
        let inner = self.read();
        WidgetSnapshot {
            panel: inner.panel,
            entries: inner.transcript.entries().to_vec(),
            input: inner.input.clone(),
            scrolled_to_bottom: inner.scrolled_to == inner.transcript.len(),
        }
    }
}

impl ChatView for WidgetState {
    fn show_panel(&self) {
        self.write().panel = PanelVisibility::Visible;
    }

    fn hide_panel(&self) {
        self.write().panel = PanelVisibility::Hidden;
    }

    fn input(&self) -> String {
        self.read().input.clone()
    }

    fn clear_input(&self) {
        self.write().input.clear();
    }

    fn append_message(&self, message: Message) {
        self.write().transcript.push_message(message);
    }

    fn show_pending(&self, id: SubmissionId) {
        self.write().transcript.push_pending(id);
    }

    fn clear_pending(&self, id: SubmissionId) {
        self.write().transcript.remove_pending(id);
    }

    fn scroll_to_bottom(&self) {
        let mut inner = self.write();
        inner.scrolled_to = inner.transcript.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let state = WidgetState::new();
        let other = state.clone();

        other.show_panel();
        other.append_message(Message::user("hi"));

        assert!(state.panel().is_visible());
        assert_eq!(state.transcript().len(), 1);
    }

    #[test]
    fn test_snapshot_tracks_scroll() {
        let state = WidgetState::new();
        state.append_message(Message::bot("hello"));
        assert!(!state.snapshot().scrolled_to_bottom);

        state.scroll_to_bottom();
        let snapshot = state.snapshot();
        assert!(snapshot.scrolled_to_bottom);
        assert_eq!(snapshot.entries.len(), 1);
    }

    #[test]
    fn test_input_round_trip() {
        let state = WidgetState::new();
        state.set_input("  draft ");
        assert_eq!(state.input(), "  draft ");
        state.clear_input();
        assert_eq!(state.input(), "");
    }
}
