//! The chat widget.
//!
//! The widget owns a panel that is either hidden or visible, and an
//! append-only transcript of message bubbles. Each submission performs one
//! request/response exchange with the remote chat endpoint, with a typing
//! indicator shown while it is in flight.
//!
//! # Structure
//!
//! - [`ChatController`]: open/close/submit/render operations
//! - [`ChatView`]: the UI seam the controller drives
//! - [`WidgetState`]: shared in-memory view used by the page server
//! - [`ChatError`]: tagged failures and the text shown for each
//!
//! # Example
//!
//! ```rust,no_run
//! use folio_chat::client::HttpChatClient;
//! use folio_chat::widget::{ChatController, WidgetState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = WidgetState::new();
//! let controller = ChatController::new(
//!     state.clone(),
//!     HttpChatClient::new("http://localhost:5000/api/chat")?,
//! );
//!
//! controller.open();
//! controller.submit("Where did you study?").await;
//! assert_eq!(state.pending_count(), 0);
//! # Ok(())
//! # }
//! ```

mod controller;
mod error;
mod message;
mod panel;
mod state;
mod transcript;
mod view;

pub use controller::{ChatController, CompletedSubmission, PendingSubmission, SubmissionOutcome};
pub use error::{ChatError, ChatErrorKind, FALLBACK_REPLY};
pub use message::{Message, Sender, SubmissionId, TranscriptEntry};
pub use panel::PanelVisibility;
pub use state::{WidgetSnapshot, WidgetState};
pub use transcript::Transcript;
pub use view::ChatView;
