//! Shared application state.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use passage_core::{AppConfig, credentials};
use passage_store::Store;

/// Clone-able handle on the store and the live session table.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn Store>,
    /// Secret mixed into session cookie signatures.
    session_secret: String,
    /// token -> username for every live session. No expiry is modeled;
    /// entries live until logout or process exit.
    sessions: RwLock<HashMap<String, String>>,
}

impl AppState {
    pub fn new(config: &AppConfig, store: Arc<dyn Store>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                session_secret: config.session.secret.clone(),
                sessions: RwLock::new(HashMap::new()),
            }),
        }
    }

    pub fn store(&self) -> &dyn Store {
        self.inner.store.as_ref()
    }

    /// Mint a session for `username` and return the signed cookie value
    /// (`<token>.<sig>`).
    pub fn open_session(&self, username: &str) -> String {
        let token = uuid::Uuid::new_v4().simple().to_string();
        self.inner
            .sessions
            .write()
            .unwrap()
            .insert(token.clone(), username.to_string());
        let sig = self.sign(&token);
        format!("{token}.{sig}")
    }

    /// Resolve a signed cookie value to a username, if the signature checks
    /// out and the session is live.
    pub fn session_user(&self, cookie_value: &str) -> Option<String> {
        let (token, sig) = cookie_value.split_once('.')?;
        if self.sign(token) != sig {
            return None;
        }
        self.inner.sessions.read().unwrap().get(token).cloned()
    }

    /// Drop the session behind a cookie value. Unknown tokens are ignored.
    pub fn close_session(&self, cookie_value: &str) {
        if let Some((token, _)) = cookie_value.split_once('.') {
            self.inner.sessions.write().unwrap().remove(token);
        }
    }

    /// Point every live session at a new username, after a credential change.
    pub fn rename_sessions(&self, username: &str) {
        for user in self.inner.sessions.write().unwrap().values_mut() {
            *user = username.to_string();
        }
    }

    fn sign(&self, token: &str) -> String {
        credentials::sha256_hex(format!("{}:{}", self.inner.session_secret, token).as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passage_store::SqliteStore;

    async fn state() -> AppState {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        AppState::new(&AppConfig::default(), Arc::new(store))
    }

    #[tokio::test]
    async fn session_round_trip() {
        let state = state().await;
        let cookie = state.open_session("admin");
        assert_eq!(state.session_user(&cookie), Some("admin".to_string()));

        state.close_session(&cookie);
        assert_eq!(state.session_user(&cookie), None);
    }

    #[tokio::test]
    async fn tampered_signature_is_rejected() {
        let state = state().await;
        let cookie = state.open_session("admin");
        let (token, _) = cookie.split_once('.').unwrap();
        assert_eq!(state.session_user(&format!("{token}.badsig")), None);
    }

    #[tokio::test]
    async fn rename_updates_live_sessions() {
        let state = state().await;
        let cookie = state.open_session("admin");
        state.rename_sessions("ops-admin");
        assert_eq!(state.session_user(&cookie), Some("ops-admin".to_string()));
    }
}
