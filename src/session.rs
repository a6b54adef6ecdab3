//! Session state.
//!
//! `SessionContext` is the one place the current identity lives. It is created at
//! startup, handed to every component through `AppState`, and written only by the
//! auth operations (the mutators are crate-private). Reads never touch storage; every
//! write goes to memory first and is then mirrored into local storage.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{error::StorageError, guard::GuardState, models::Session, storage::StorageState};

/// Local storage key holding the serialized `Session`.
pub const SESSION_STORAGE_KEY: &str = "ecowaste_user";

#[derive(Debug, Clone)]
struct SessionSnapshot {
    user: Option<Session>,
    is_loading: bool,
}

/// SessionContext
///
/// Cheap to clone; all clones observe the same session.
///
/// Lifecycle: `new` (loading) → `restore` → mutated by login/register/logout →
/// `teardown` on shutdown.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<RwLock<SessionSnapshot>>,
    storage: StorageState,
}

impl SessionContext {
    /// Creates an unresolved context. The guard reports `Loading` until `restore`
    /// finishes.
    pub fn new(storage: StorageState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionSnapshot {
                user: None,
                is_loading: true,
            })),
            storage,
        }
    }

    /// restore
    ///
    /// Rebuilds the session from local storage. A missing key means "signed out". A
    /// record that no longer deserializes is removed so it cannot wedge later
    /// startups. Storage faults are logged and treated as "signed out".
    pub async fn restore(&self) -> Option<Session> {
        let restored = match self.storage.get_item(SESSION_STORAGE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!(error = %e, "discarding unreadable session record");
                    if let Err(e) = self.storage.remove_item(SESSION_STORAGE_KEY).await {
                        tracing::warn!(error = %e, "failed to remove unreadable session record");
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "session restoration failed, starting signed out");
                None
            }
        };

        let mut state = self.inner.write().await;
        state.user = restored.clone();
        state.is_loading = false;

        match &restored {
            Some(session) => tracing::info!(user_id = %session.id, role = %session.role, "session restored"),
            None => tracing::debug!("no session to restore"),
        }
        restored
    }

    /// The signed-in identity, if any.
    pub async fn current(&self) -> Option<Session> {
        self.inner.read().await.user.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.read().await.is_loading
    }

    /// Guard state for the navigation happening right now.
    pub async fn guard_state(&self) -> GuardState {
        let state = self.inner.read().await;
        GuardState::evaluate(state.is_loading, state.user.as_ref())
    }

    /// Consistent `(guard, session)` pair read under one lock.
    pub async fn observe(&self) -> (GuardState, Option<Session>) {
        let state = self.inner.read().await;
        (
            GuardState::evaluate(state.is_loading, state.user.as_ref()),
            state.user.clone(),
        )
    }

    /// Installs a copy of `session` and persists it. The write lock is held until
    /// storage has been written, so a concurrent `clear` cannot land in between. The
    /// in-memory session is set even when persistence fails; the error is returned
    /// for the caller to log.
    pub(crate) async fn establish(&self, session: &Session) -> Result<(), StorageError> {
        let raw = serde_json::to_string(session)?;
        let mut state = self.inner.write().await;
        state.user = Some(session.clone());
        self.storage.set_item(SESSION_STORAGE_KEY, &raw).await
    }

    /// Drops the session from memory and storage under one write lock. Idempotent.
    pub(crate) async fn clear(&self) -> Result<(), StorageError> {
        let mut state = self.inner.write().await;
        state.user = None;
        self.storage.remove_item(SESSION_STORAGE_KEY).await
    }

    /// teardown
    ///
    /// Releases the in-memory session at shutdown. The persisted record stays so
    /// the next start restores it; the context reports `Loading` again until another
    /// `restore`.
    pub async fn teardown(&self) {
        let mut state = self.inner.write().await;
        state.user = None;
        state.is_loading = true;
        tracing::debug!("session context torn down");
    }
}
