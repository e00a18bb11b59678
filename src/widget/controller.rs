//! Chat widget controller.
//!
//! Drives a [`ChatView`] through panel toggles and message submissions,
//! using a [`ChatTransport`] for the one network exchange per submission.

use tracing::{info, warn};

use super::error::{ChatErrorKind, FALLBACK_REPLY};
use super::message::{Message, Sender, SubmissionId};
use super::view::ChatView;
use crate::client::ChatTransport;

/// What a submission ended up rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The endpoint's `response` was appended.
    Replied,
    /// The reply had no usable `response`; the fallback text was appended.
    Fallback,
    /// The exchange failed; an error message was appended.
    Failed(ChatErrorKind),
}

/// A submission whose user message and typing indicator are on screen but
/// whose exchange has not run yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub id: SubmissionId,
    /// Trimmed text sent to the endpoint.
    pub text: String,
}

/// A finished exchange and the bot message it rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedSubmission {
    pub id: SubmissionId,
    pub outcome: SubmissionOutcome,
    pub reply: Message,
}

#[derive(Debug, Clone)]
pub struct ChatController<V, T> {
    view: V,
    transport: T,
}

impl<V: ChatView, T: ChatTransport> ChatController<V, T> {
    pub fn new(view: V, transport: T) -> Self {
        Self { view, transport }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Launcher activated.
    pub fn open(&self) {
        self.view.show_panel();
    }

    /// Close control activated. The transcript is kept.
    pub fn close(&self) {
        self.view.hide_panel();
    }

    /// Submit whatever is in the input field.
    pub async fn submit_input(&self) -> Option<SubmissionOutcome> {
        let text = self.view.input();
        self.submit(&text).await
    }

    /// Submit `text` as a user message and render the endpoint's answer.
    ///
    /// Blank input is dropped without touching the view and returns `None`.
    pub async fn submit(&self, text: &str) -> Option<SubmissionOutcome> {
        let pending = self.begin(text)?;
        Some(self.complete(pending).await.outcome)
    }

    /// First half of [`submit`](Self::submit): render the user message, clear
    /// the input and show the typing indicator. No request is made yet.
    pub fn begin(&self, text: &str) -> Option<PendingSubmission> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.render_message(text, Sender::User);
        self.view.clear_input();

        let id = SubmissionId::new();
        self.view.show_pending(id);
        self.view.scroll_to_bottom();

        Some(PendingSubmission {
            id,
            text: text.to_string(),
        })
    }

    /// Second half of [`submit`](Self::submit): run the exchange, remove this
    /// submission's indicator and render exactly one bot message.
    pub async fn complete(&self, pending: PendingSubmission) -> CompletedSubmission {
        let PendingSubmission { id, text } = pending;

        info!(name: "chat.request.sent", submission = %id, "Chat message submitted");
        let result = self.transport.send(&text).await;

        // The marker goes first on every path.
        self.view.clear_pending(id);

        let (reply, outcome) = match result {
            Ok(reply) => match reply.response {
                Some(response) => (response, SubmissionOutcome::Replied),
                None => (FALLBACK_REPLY.to_string(), SubmissionOutcome::Fallback),
            },
            Err(err) => {
                warn!(
                    name: "chat.request.failed",
                    submission = %id,
                    kind = err.kind().as_str(),
                    error = %err,
                    "Chat request failed"
                );
                (err.user_message(), SubmissionOutcome::Failed(err.kind()))
            }
        };
        self.render_message(reply.clone(), Sender::Bot);
        let reply = Message::bot(reply);

        info!(name: "chat.request.completed", submission = %id, outcome = ?outcome, "Chat exchange completed");
        CompletedSubmission { id, outcome, reply }
    }

    /// Append a message and keep the latest entry in view.
    pub fn render_message(&self, text: impl Into<String>, sender: Sender) {
        self.view.append_message(Message {
            text: text.into(),
            sender,
        });
        self.view.scroll_to_bottom();
    }
}
