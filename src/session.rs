//! Visitor sessions.
//!
//! Each page load gets its own session holding the widget state and the
//! mobile menu flag. Nothing is persisted: a reload starts over. Sessions
//! idle for longer than the configured timeout are swept.
//!
//! # Example
//!
//! ```rust
//! use folio_chat::session::SessionStore;
//! use folio_chat::widget::ChatView;
//!
//! let store = SessionStore::new();
//! let session = store.create();
//! session.widget().show_panel();
//!
//! let same = store.get(session.id()).unwrap();
//! assert!(same.widget().panel().is_visible());
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::nav::NavMenu;
use crate::widget::{PendingSubmission, SubmissionId, WidgetState};

/// Default session timeout (30 minutes).
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// One visitor's page state. Clones share the same session.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    id: String,
    widget: WidgetState,
    menu: RwLock<NavMenu>,
    /// Submissions shown on the page whose exchange has not been requested yet.
    pending: Mutex<HashMap<SubmissionId, PendingSubmission>>,
    last_activity: RwLock<DateTime<Utc>>,
}

impl Session {
    fn new(id: String) -> Self {
        let now = Utc::now();
        Self {
            inner: Arc::new(SessionInner {
                id,
                widget: WidgetState::new(),
                menu: RwLock::new(NavMenu::default()),
                pending: Mutex::default(),
                last_activity: RwLock::new(now),
            }),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// The chat widget shown on this visitor's page.
    #[must_use]
    pub fn widget(&self) -> &WidgetState {
        &self.inner.widget
    }

    #[must_use]
    pub fn menu(&self) -> NavMenu {
        *self.inner.menu.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `f` to the menu flag and return the new state.
    pub fn update_menu(&self, f: impl FnOnce(&mut NavMenu)) -> NavMenu {
        let mut guard = self.inner.menu.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard);
        *guard
    }

    /// Keep a begun submission until the page asks for its reply.
    pub fn hold_pending(&self, pending: PendingSubmission) {
        self.inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(pending.id, pending);
    }

    /// Claim a held submission. Each one can be claimed once.
    pub fn take_pending(&self, id: SubmissionId) -> Option<PendingSubmission> {
        self.inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
    }

    /// Record activity, pushing back expiry.
    pub fn touch(&self) {
        let mut guard = self
            .inner
            .last_activity
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Utc::now();
    }

    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        let last = *self
            .inner
            .last_activity
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        // A negative span means clock skew; treat as fresh.
        (Utc::now() - last)
            .to_std()
            .is_ok_and(|idle| idle > timeout)
    }
}

/// Thread-safe store for sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new session and return it.
    #[must_use]
    pub fn create(&self) -> Session {
        let session = Session::new(Uuid::new_v4().to_string());
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session.id().to_string(), session.clone());
        session
    }

    /// Get a session by ID, marking it active.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Session> {
        let session = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()?;
        session.touch();
        Some(session)
    }

    pub fn remove(&self, id: &str) -> Option<Session> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove sessions that have been inactive longer than the timeout.
    ///
    /// Returns the number of sessions removed.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> usize {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let before = guard.len();
        guard.retain(|_, session| !session.is_expired_with_timeout(timeout));
        before - guard.len()
    }
}
