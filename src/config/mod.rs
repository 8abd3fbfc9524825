use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_POLL_INTERVAL_MS: u32 = 5_000;

/// Backend project credentials.
///
/// Baked in at build time from `QUIRKITOPIA_*` environment variables; the
/// page shell may override any of them through `window.ENV` using the same
/// camelCase keys the backend console hands out.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BackendConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

impl BackendConfig {
    pub const KEYS: [&'static str; 6] = [
        "apiKey",
        "authDomain",
        "projectId",
        "storageBucket",
        "messagingSenderId",
        "appId",
    ];

    pub fn load() -> Self {
        Self::build_time().with_overrides(window_env_string)
    }

    pub fn build_time() -> Self {
        Self::from_lookup(build_time_value)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::default().with_overrides(lookup)
    }

    /// Non-empty values from `lookup` replace the current ones.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        for key in Self::KEYS {
            let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) else {
                continue;
            };
            if let Some(slot) = self.slot_mut(key) {
                *slot = value;
            }
        }
        self
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut String> {
        match key {
            "apiKey" => Some(&mut self.api_key),
            "authDomain" => Some(&mut self.auth_domain),
            "projectId" => Some(&mut self.project_id),
            "storageBucket" => Some(&mut self.storage_bucket),
            "messagingSenderId" => Some(&mut self.messaging_sender_id),
            "appId" => Some(&mut self.app_id),
            _ => None,
        }
    }

    /// Keys the REST client cannot work without.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.api_key.trim().is_empty() {
            out.push("apiKey");
        }
        if self.project_id.trim().is_empty() {
            out.push("projectId");
        }
        if self.storage_bucket.trim().is_empty() {
            out.push("storageBucket");
        }
        out
    }

    /// Resource name prefix of every document, e.g. `projects/p/databases/(default)/documents`.
    pub fn documents_root(&self) -> String {
        format!("projects/{}/databases/(default)/documents", self.project_id)
    }

    pub fn firestore_base(&self) -> String {
        format!("https://firestore.googleapis.com/v1/{}", self.documents_root())
    }

    pub fn storage_base(&self) -> String {
        format!(
            "https://firebasestorage.googleapis.com/v0/b/{}/o",
            self.storage_bucket
        )
    }

    pub fn sign_in_url(&self) -> String {
        format!(
            "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword?key={}",
            urlencoding::encode(&self.api_key)
        )
    }
}

fn build_time_value(key: &str) -> Option<String> {
    let value = match key {
        "apiKey" => option_env!("QUIRKITOPIA_API_KEY"),
        "authDomain" => option_env!("QUIRKITOPIA_AUTH_DOMAIN"),
        "projectId" => option_env!("QUIRKITOPIA_PROJECT_ID"),
        "storageBucket" => option_env!("QUIRKITOPIA_STORAGE_BUCKET"),
        "messagingSenderId" => option_env!("QUIRKITOPIA_MESSAGING_SENDER_ID"),
        "appId" => option_env!("QUIRKITOPIA_APP_ID"),
        _ => None,
    };
    value.map(str::to_string)
}

fn window_env_value(key: &str) -> Option<wasm_bindgen::JsValue> {
    let window = web_sys::window()?;
    let env = window.get("ENV")?;
    if env.is_undefined() || !env.is_object() {
        return None;
    }
    js_sys::Reflect::get(&env, &key.into()).ok()
}

fn window_env_string(key: &str) -> Option<String> {
    window_env_value(key)?.as_string()
}

/// Everything the app reads at startup.
#[derive(Clone, Debug)]
pub(crate) struct AppConfig {
    pub backend: BackendConfig,
    pub poll_interval_ms: u32,
    pub log_level: log::Level,
}

impl AppConfig {
    pub fn load() -> Self {
        let poll_interval_ms = window_env_value("pollIntervalMs")
            .and_then(|v| v.as_f64())
            .filter(|ms| *ms >= 1_000.0)
            .map(|ms| ms as u32)
            .unwrap_or(DEFAULT_POLL_INTERVAL_MS);

        Self {
            backend: BackendConfig::load(),
            poll_interval_ms,
            log_level: parse_log_level(option_env!("QUIRKITOPIA_LOG")),
        }
    }
}

pub(crate) fn parse_log_level(raw: Option<&str>) -> log::Level {
    raw.and_then(|s| s.trim().parse().ok())
        .unwrap_or(log::Level::Info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_from_lookup_reads_recognized_keys() {
        let cfg = BackendConfig::from_lookup(lookup(&[
            ("apiKey", "k"),
            ("authDomain", "quirk.firebaseapp.com"),
            ("projectId", "quirk"),
            ("storageBucket", "quirk.appspot.com"),
            ("messagingSenderId", "42"),
            ("appId", "1:42:web:abc"),
            ("measurementId", "ignored"),
        ]));
        assert_eq!(cfg.api_key, "k");
        assert_eq!(cfg.project_id, "quirk");
        assert_eq!(cfg.messaging_sender_id, "42");
        assert!(cfg.missing_keys().is_empty());
    }

    #[test]
    fn test_empty_override_keeps_existing_value() {
        let base = BackendConfig::from_lookup(lookup(&[("projectId", "quirk")]));
        let cfg = base.with_overrides(lookup(&[("projectId", "  "), ("apiKey", "k2")]));
        assert_eq!(cfg.project_id, "quirk");
        assert_eq!(cfg.api_key, "k2");
    }

    #[test]
    fn test_missing_keys_lists_required_only() {
        let cfg = BackendConfig::from_lookup(lookup(&[("appId", "x")]));
        assert_eq!(cfg.missing_keys(), vec!["apiKey", "projectId", "storageBucket"]);
    }

    #[test]
    fn test_endpoints_are_derived_from_project() {
        let cfg = BackendConfig::from_lookup(lookup(&[
            ("apiKey", "k"),
            ("projectId", "quirk"),
            ("storageBucket", "quirk.appspot.com"),
        ]));
        assert_eq!(
            cfg.firestore_base(),
            "https://firestore.googleapis.com/v1/projects/quirk/databases/(default)/documents"
        );
        assert_eq!(
            cfg.storage_base(),
            "https://firebasestorage.googleapis.com/v0/b/quirk.appspot.com/o"
        );
        assert!(cfg.sign_in_url().ends_with("accounts:signInWithPassword?key=k"));
    }

    #[test]
    fn test_config_deserializes_console_snippet() {
        let json = r#"{
            "apiKey": "k",
            "authDomain": "quirk.firebaseapp.com",
            "projectId": "quirk",
            "storageBucket": "quirk.appspot.com",
            "messagingSenderId": "42",
            "appId": "1:42:web:abc"
        }"#;
        let cfg: BackendConfig = serde_json::from_str(json).expect("config should parse");
        assert_eq!(cfg.storage_bucket, "quirk.appspot.com");
    }

    #[test]
    fn test_parse_log_level_defaults_to_info() {
        assert_eq!(parse_log_level(None), log::Level::Info);
        assert_eq!(parse_log_level(Some("debug")), log::Level::Debug);
        assert_eq!(parse_log_level(Some("nonsense")), log::Level::Info);
    }
}
