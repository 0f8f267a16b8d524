//! Session lifecycle driven by auth-state events.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::info;

use granth_core::errors::{GranthError, GranthResult};
use granth_core::models::User;

use crate::gate::AccessState;

/// Auth-state change reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(User),
    SignedOut,
}

/// One signed-in user's session.
///
/// Unlocks live here and nowhere else: signing out forgets every purchase.
#[derive(Debug)]
pub struct SessionContext {
    id: String,
    user: User,
    started_at: DateTime<Utc>,
    access: DashMap<String, AccessState>,
}

impl SessionContext {
    pub fn new(user: User) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user,
            started_at: Utc::now(),
            access: DashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn duration(&self) -> Duration {
        Utc::now() - self.started_at
    }

    /// Recorded state of a paid item. Items never touched are `Locked`.
    pub fn access_state(&self, item_id: &str) -> AccessState {
        self.access
            .get(item_id)
            .map(|state| *state)
            .unwrap_or(AccessState::Locked)
    }

    pub fn is_unlocked(&self, item_id: &str) -> bool {
        self.access_state(item_id) == AccessState::Unlocked
    }

    /// Ids of every item unlocked in this session.
    pub fn unlocked_items(&self) -> Vec<String> {
        self.access
            .iter()
            .filter(|entry| *entry.value() == AccessState::Unlocked)
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Move `item_id` to `Unlocking` unless an unlock is already running.
    pub(crate) fn try_begin_unlock(&self, item_id: &str) -> bool {
        let mut entry = self
            .access
            .entry(item_id.to_string())
            .or_insert(AccessState::Locked);
        if *entry == AccessState::Unlocking {
            return false;
        }
        *entry = AccessState::Unlocking;
        true
    }

    pub(crate) fn set_access_state(&self, item_id: &str, state: AccessState) {
        self.access.insert(item_id.to_string(), state);
    }

    pub(crate) fn clear_access_state(&self, item_id: &str) {
        self.access.remove(item_id);
    }

    /// Authoring guard.
    pub fn require_admin(&self) -> GranthResult<()> {
        if self.user.is_admin() {
            Ok(())
        } else {
            Err(GranthError::Unauthorized {
                reason: format!("user {} is not an admin", self.user.id),
            })
        }
    }
}

/// Holds the single active session, if any.
#[derive(Debug, Default)]
pub struct SessionManager {
    current: RwLock<Option<Arc<SessionContext>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an auth-state change. Returns the session now active.
    pub fn handle(&self, event: AuthEvent) -> Option<Arc<SessionContext>> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        match event {
            AuthEvent::SignedIn(user) => {
                let session = Arc::new(SessionContext::new(user));
                info!(session_id = %session.id(), user_id = %session.user().id, "session started");
                *current = Some(Arc::clone(&session));
                Some(session)
            }
            AuthEvent::SignedOut => {
                if let Some(ended) = current.take() {
                    info!(
                        session_id = %ended.id(),
                        duration_secs = ended.duration().num_seconds(),
                        "session ended"
                    );
                }
                None
            }
        }
    }

    pub fn current(&self) -> Option<Arc<SessionContext>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The active session, or `NoSession`.
    pub fn require(&self) -> GranthResult<Arc<SessionContext>> {
        self.current().ok_or(GranthError::NoSession)
    }

    pub fn is_signed_in(&self) -> bool {
        self.current().is_some()
    }
}
