//! Page navigation: in-page anchor scrolling and the mobile hamburger menu.

use serde::{Deserialize, Serialize};

/// `ScrollIntoViewOptions.behavior`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    #[default]
    Smooth,
}

/// `ScrollIntoViewOptions.block`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBlock {
    /// Align the top of the target with the top of the viewport.
    #[default]
    Start,
}

/// Options passed to the browser's `scrollIntoView`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScrollOptions {
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

impl ScrollOptions {
    /// JSON literal for inline scripts, e.g. `{"behavior":"smooth","block":"start"}`.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Where an anchor click should scroll to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollTarget {
    pub id: String,
    pub options: ScrollOptions,
}

/// The element id an in-page link points at, if it is one.
#[must_use]
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// A page section reachable from the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl Section {
    pub fn href(&self) -> String {
        format!("#{}", self.id)
    }
}

/// The navigation bar's links.
#[derive(Debug, Clone, Default)]
pub struct SiteNav {
    sections: Vec<Section>,
}

impl SiteNav {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Resolve a link to a scroll target. Links to unknown ids go nowhere.
    pub fn scroll_target(&self, href: &str) -> Option<ScrollTarget> {
        let id = anchor_target(href)?;
        self.sections
            .iter()
            .any(|section| section.id == id)
            .then(|| ScrollTarget {
                id: id.to_string(),
                options: ScrollOptions::default(),
            })
    }
}

/// Mobile menu state. The hamburger button and the menu share one flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    active: bool,
}

impl NavMenu {
    #[must_use]
    pub fn is_active(self) -> bool {
        self.active
    }

    /// Hamburger clicked.
    pub fn toggle(&mut self) {
        self.active = !self.active;
    }

    /// A navigation link was followed.
    pub fn close(&mut self) {
        self.active = false;
    }

    /// `base` plus ` active` while the menu is open.
    #[must_use]
    pub fn class(self, base: &str) -> String {
        if self.active {
            format!("{base} active")
        } else {
            base.to_string()
        }
    }
}
