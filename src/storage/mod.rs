use crate::session::AdminSession;
use serde::{Deserialize, Serialize};

pub(crate) const SESSION_KEY: &str = "quirkitopia_admin_session";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let storage = local_storage()?;
    let json = storage.get_item(key).ok().flatten()?;
    serde_json::from_str(&json).ok()
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(key, &json);
        }
    }
}

pub(crate) fn remove_from_storage(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

pub(crate) fn save_session(session: &AdminSession) {
    save_json_to_storage(SESSION_KEY, session);
}

/// A stored value that no longer parses is treated as signed out.
pub(crate) fn load_session() -> Option<AdminSession> {
    load_json_from_storage(SESSION_KEY)
}

pub(crate) fn clear_session() {
    remove_from_storage(SESSION_KEY);
}
