use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::observer::{Listeners, Subscription};

/// A signed-in admin, as returned by the identity provider.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct AdminSession {
    pub uid: String,
    pub email: String,
    pub id_token: String,
    pub refresh_token: String,
}

/// Who is signed in, plus change notification.
///
/// Passed around explicitly (context / constructor) rather than read from a
/// global. Listeners are called outside the lock.
#[derive(Clone, Default)]
pub(crate) struct AuthState {
    current: Arc<Mutex<Option<AdminSession>>>,
    listeners: Listeners<Option<AdminSession>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|p| p.into_inner())
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restore(session: Option<AdminSession>) -> Self {
        let state = Self::new();
        *lock(&state.current) = session;
        state
    }

    pub fn current(&self) -> Option<AdminSession> {
        lock(&self.current).clone()
    }

    pub fn id_token(&self) -> Option<String> {
        lock(&self.current).as_ref().map(|s| s.id_token.clone())
    }

    /// `listener` runs right away with the current state, then on every change.
    pub fn subscribe(
        &self,
        listener: impl Fn(&Option<AdminSession>) + Send + Sync + 'static,
    ) -> Subscription {
        let current = self.current();
        listener(&current);
        self.listeners.add(listener)
    }

    pub fn set(&self, session: Option<AdminSession>) {
        {
            let mut current = lock(&self.current);
            if *current == session {
                return;
            }
            *current = session.clone();
        }
        log::debug!(
            "admin session {}",
            if session.is_some() { "started" } else { "ended" }
        );
        self.listeners.emit(&session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> AdminSession {
        AdminSession {
            uid: "u1".into(),
            email: "admin@quirkitopia.space".into(),
            id_token: "id-token".into(),
            refresh_token: "refresh".into(),
        }
    }

    #[test]
    fn test_subscribe_fires_immediately_then_on_change() {
        let auth = AuthState::new();
        let seen: Arc<Mutex<Vec<bool>>> = Arc::default();
        let s = seen.clone();
        let _sub = auth.subscribe(move |v| s.lock().unwrap().push(v.is_some()));

        auth.set(Some(session()));
        auth.set(Some(session()));
        auth.set(None);

        assert_eq!(*seen.lock().unwrap(), vec![false, true, false]);
    }

    #[test]
    fn test_restore_and_token() {
        let auth = AuthState::restore(Some(session()));
        assert!(auth.current().is_some());
        assert_eq!(auth.id_token().as_deref(), Some("id-token"));
    }

    #[test]
    fn test_unsubscribed_listener_is_silent() {
        let auth = AuthState::new();
        let seen: Arc<Mutex<usize>> = Arc::default();
        let s = seen.clone();
        let sub = auth.subscribe(move |_| *s.lock().unwrap() += 1);
        sub.unsubscribe();

        auth.set(Some(session()));
        assert_eq!(*seen.lock().unwrap(), 1);
    }

    #[test]
    fn test_session_serializes_for_storage() {
        let json = serde_json::to_string(&session()).unwrap();
        let back: AdminSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session());
    }
}
