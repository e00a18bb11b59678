//! Chat messages and transcript entries.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Typed by the visitor.
    User,
    /// Produced by the chat endpoint, or by the widget on failure.
    Bot,
}

impl Sender {
    /// CSS class used for the message bubble (`user-message` / `bot-message`).
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::User => "user-message",
            Self::Bot => "bot-message",
        }
    }

    /// Short label used by the terminal front end.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "you",
            Self::Bot => "bot",
        }
    }
}

/// A rendered chat message. Immutable once appended to a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
        }
    }
}

/// Identifies one submission, and therefore its pending-request marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for SubmissionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One slot in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEntry {
    Message(Message),
    /// Typing indicator for an in-flight submission.
    Pending(SubmissionId),
}

impl TranscriptEntry {
    #[must_use]
    pub fn as_message(&self) -> Option<&Message> {
        match self {
            Self::Message(message) => Some(message),
            Self::Pending(_) => None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_classes() {
        assert_eq!(Sender::User.css_class(), "user-message");
        assert_eq!(Sender::Bot.css_class(), "bot-message");
    }

    #[test]
    fn test_submission_ids_are_distinct() {
        assert_ne!(SubmissionId::new(), SubmissionId::new());
    }

    #[test]
    fn test_entry_accessors() {
        let entry = TranscriptEntry::Message(Message::user("hello"));
        assert_eq!(entry.as_message().map(|m| m.text.as_str()), Some("hello"));
        assert!(!entry.is_pending());

        let pending = TranscriptEntry::Pending(SubmissionId::new());
        assert!(pending.as_message().is_none());
        assert!(pending.is_pending());
    }
}
