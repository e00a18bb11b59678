//! Chat panel visibility.

use serde::Serialize;

/// Whether the chat window is shown. Starts hidden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelVisibility {
    #[default]
    Hidden,
    Visible,
}

impl PanelVisibility {
    #[must_use]
    pub fn is_visible(self) -> bool {
        self == Self::Visible
    }

    /// CSS `display` value for the chat window.
    #[must_use]
    pub fn display(self) -> &'static str {
        match self {
            Self::Hidden => "none",
            Self::Visible => "flex",
        }
    }
}
