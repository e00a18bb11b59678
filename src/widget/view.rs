//! The seam between the chat controller and whatever displays the widget.

use super::message::{Message, SubmissionId};

/// UI handles the [`ChatController`](super::ChatController) drives.
///
/// Implementations use interior mutability: the controller shares one view
/// across overlapping submissions and never holds it across the network call.
pub trait ChatView: Send + Sync {
    fn show_panel(&self);

    fn hide_panel(&self);

    /// Current contents of the text input.
    fn input(&self) -> String;

    fn clear_input(&self);

    /// Append a message bubble. Text is displayed verbatim.
    fn append_message(&self, message: Message);

    /// Append the typing indicator for `id`.
    fn show_pending(&self, id: SubmissionId);

    /// Remove the typing indicator for `id`, wherever it sits.
    fn clear_pending(&self, id: SubmissionId);

    fn scroll_to_bottom(&self);
}
