use leptos::prelude::*;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::error::SiteError;
use crate::models::{Book, Idea, Podcast, YouTubeChannel};
use crate::notify::Notifier;
use crate::observer::Subscription;
use crate::repo::Repository;
use crate::session::{AdminSession, AuthState};
use crate::storage::{clear_session, load_session, save_session};
use crate::sync::SyncClient;

#[derive(Clone)]
pub(crate) struct AppState {
    pub config: AppConfig,
    pub api: Arc<ApiClient>,
    pub auth: AuthState,

    /// Reactive mirror of `auth`, for views.
    pub session: RwSignal<Option<AdminSession>>,
    _session_bridge: Arc<Subscription>,

    pub sync: SyncClient,
    pub books: Repository<Book>,
    pub youtube: Repository<YouTubeChannel>,
    pub podcasts: Repository<Podcast>,
    pub ideas: Repository<Idea>,

    pub notifier: Notifier,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let auth = AuthState::restore(load_session());
        let api = Arc::new(ApiClient::new(config.backend.clone(), auth.clone()));
        let sync = SyncClient::new(api.clone());

        let session = RwSignal::new(auth.current());
        let bridge = auth.subscribe(move |s| {
            let _ = session.try_set(s.clone());
        });

        Self {
            books: Repository::new(api.clone(), api.clone(), sync.clone()),
            youtube: Repository::new(api.clone(), api.clone(), sync.clone()),
            podcasts: Repository::new(api.clone(), api.clone(), sync.clone()),
            ideas: Repository::new(api.clone(), api.clone(), sync.clone()),
            config,
            api,
            auth,
            session,
            _session_bridge: Arc::new(bridge),
            sync,
            notifier: Notifier::new(),
        }
    }

    pub fn start_live_sync(&self) {
        self.sync.start_polling(self.config.poll_interval_ms);
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), SiteError> {
        let session = self.api.sign_in(email.trim(), password).await?;
        log::info!("signed in as {}", session.email);
        save_session(&session);
        self.auth.set(Some(session));
        // Collections such as `ideas` may only be readable once signed in.
        self.sync.refresh_all().await;
        Ok(())
    }

    pub fn sign_out(&self) {
        clear_session();
        self.auth.set(None);
    }

    /// Logs a failed backend operation and raises an error toast.
    /// A rejected session signs the admin out.
    pub fn report_failure(&self, title: &str, err: &SiteError) {
        if err.is_unauthorized() {
            self.sign_out();
        }
        self.notifier.failure(title, err);
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
