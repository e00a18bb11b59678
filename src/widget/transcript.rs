//! Append-only chat transcript.
//!
//! Messages are only ever appended, oldest first. The one removal allowed is
//! of a pending-request marker, addressed by the submission that created it,
//! so overlapping submissions never remove each other's markers.

use super::message::{Message, SubmissionId, TranscriptEntry};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_message(&mut self, message: Message) {
        self.entries.push(TranscriptEntry::Message(message));
    }

    pub fn push_pending(&mut self, id: SubmissionId) {
        self.entries.push(TranscriptEntry::Pending(id));
    }

    /// Remove the marker for `id`. Returns `false` if no such marker exists.
    pub fn remove_pending(&mut self, id: SubmissionId) -> bool {
        let position = self
            .entries
            .iter()
            .position(|entry| *entry == TranscriptEntry::Pending(id));
        match position {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Rendered messages in insertion order, markers skipped.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().filter_map(TranscriptEntry::as_message)
    }

    #[must_use]
    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_pending()).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.push_message(Message::user("one"));
        transcript.push_message(Message::bot("two"));
        transcript.push_message(Message::user("three"));

        let texts: Vec<_> = transcript.messages().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }

    #[test]
    fn test_remove_pending_targets_one_marker() {
        let mut transcript = Transcript::new();
        let first = SubmissionId::new();
        let second = SubmissionId::new();

        transcript.push_pending(first);
        transcript.push_message(Message::user("between"));
        transcript.push_pending(second);
        assert_eq!(transcript.pending_count(), 2);

        assert!(transcript.remove_pending(second));
        assert_eq!(transcript.pending_count(), 1);
        assert_eq!(transcript.entries()[0], TranscriptEntry::Pending(first));

        assert!(!transcript.remove_pending(second));
        assert!(transcript.remove_pending(first));
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn test_empty_transcript() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert!(transcript.last().is_none());
        assert_eq!(transcript.pending_count(), 0);
    }
}
