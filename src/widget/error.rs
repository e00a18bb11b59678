//! Chat exchange failures and the text shown to the visitor for each.

use thiserror::Error;
use url::Url;

/// Bot message used when a successful reply carries no usable `response`.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't process your request. Please try again.";

/// Why a chat exchange failed. Tagged where the failure happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// The request never completed (DNS, refused connection, reset, ...).
    #[error("failed to reach {endpoint}: {reason}")]
    Connectivity { endpoint: Url, reason: String },

    /// The endpoint answered with a non-success status.
    #[error("HTTP error! status: {0}")]
    ServerStatus(u16),

    /// Anything else, e.g. a malformed JSON body.
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of a [`ChatError`], for logs and outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    Connectivity,
    ServerStatus,
    Other,
}

impl ChatErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connectivity => "connectivity",
            Self::ServerStatus => "server_status",
            Self::Other => "other",
        }
    }
}

impl ChatError {
    #[must_use]
    pub fn kind(&self) -> ChatErrorKind {
        match self {
            Self::Connectivity { .. } => ChatErrorKind::Connectivity,
            Self::ServerStatus(_) => ChatErrorKind::ServerStatus,
            Self::Other(_) => ChatErrorKind::Other,
        }
    }

    /// The bot message rendered into the transcript for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Connectivity { endpoint, .. } => format!(
                "Error: Cannot connect to the server. Please make sure the chat backend is running on {} and the {} endpoint is available.",
                endpoint.origin().ascii_serialization(),
                endpoint.path()
            ),
            Self::ServerStatus(_) => format!(
                "Error: The server returned an error ({self}). Please check if the backend is configured correctly."
            ),
            Self::Other(description) => {
                format!("Error: {description}. Please check the logs for more details.")
            }
        }
    }
}
