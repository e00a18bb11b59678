//! Folio Chat
//!
//! The chat widget of a personal website: a launcher that opens a chat panel,
//! a transcript of message bubbles, and a relay to a remote chat endpoint.
//!
//! # Architecture
//!
//! - **Widget**: UI-agnostic controller driving an injected [`widget::ChatView`]
//! - **Client**: `reqwest` transport for the `POST /api/chat` exchange
//! - **Server**: Axum + HTMX page server keeping widget state per visitor
//! - **Terminal**: the same controller driven from stdin
//!
//! # Modules
//!
//! - [`widget`]: controller, transcript model, view seam, errors
//! - [`client`]: chat transport trait and HTTP implementation
//! - [`nav`]: anchor scrolling and hamburger menu state
//! - [`render`]: HTML for the page and its fragments
//! - [`session`]: per-visitor state
//! - [`config`]: CLI and layered configuration

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod client;
pub mod config;
pub mod nav;
pub mod render;
pub mod server;
pub mod session;
pub mod terminal;
pub mod widget;

use std::sync::Arc;

use client::ChatTransport;
use config::SiteConfig;
use nav::SiteNav;
use session::SessionStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Visitor sessions, one per page load.
    pub sessions: SessionStore,
    /// Transport to the remote chat endpoint.
    pub transport: Arc<dyn ChatTransport>,
    /// Page content.
    pub site: Arc<SiteConfig>,
    /// Navigation links derived from the page sections.
    pub nav: Arc<SiteNav>,
}
