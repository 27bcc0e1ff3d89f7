use jiff::Timestamp;
use secrecy::SecretString;
use types::{
    Leader, Result, Session, SessionState,
    session::{AUTH_TOKEN_KEY, USER_DATA_KEY},
};

use crate::{
    CONFIG,
    storage::KeyValueStore,
    token::{self, Claims},
};

/// Persists the session token and the leader identity in a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read the persisted session, treating anything unusable as anonymous.
    ///
    /// Tokens that fail verification or have expired are removed.
    pub fn restore(&self, key: &SecretString, now: Timestamp) -> SessionState {
        let Some(raw) = self.store.get(AUTH_TOKEN_KEY) else {
            return SessionState::Anonymous;
        };

        let claims = match token::verify(&raw, key) {
            Ok(claims) => claims,
            Err(error) => {
                tracing::warn!(%error, "discarding invalid session token");
                self.clear();
                return SessionState::Anonymous;
            }
        };

        if claims.is_expired_at(now) {
            tracing::info!(expired_at = %claims.expires_at, "session expired");
            self.clear();
            return SessionState::Anonymous;
        }

        let leader = self
            .store
            .get(USER_DATA_KEY)
            .and_then(|json| serde_json::from_str::<Leader>(&json).ok());

        let Some(leader) = leader else {
            tracing::warn!("session token present without leader data");
            self.clear();
            return SessionState::Anonymous;
        };

        SessionState::Authenticated(Session {
            token: types::SessionToken::new(raw),
            leader,
            expires_at: claims.expires_at,
        })
    }

    /// Mint, sign and persist a session for `leader`.
    pub fn open(&self, leader: Leader, remember_me: bool, key: &SecretString) -> Result<Session> {
        let claims = Claims::new(CONFIG.session_ttl(remember_me))?;
        let token = token::sign(&claims, key)?;

        self.store.set(USER_DATA_KEY, &serde_json::to_string(&leader)?);
        self.store.set(AUTH_TOKEN_KEY, token.expose());

        Ok(Session {
            token,
            leader,
            expires_at: claims.expires_at,
        })
    }

    pub fn clear(&self) {
        self.store.remove(AUTH_TOKEN_KEY);
        self.store.remove(USER_DATA_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use jiff::SignedDuration;
    use types::LoginMethod;

    fn key() -> SecretString {
        "session-test-key".into()
    }

    fn leader() -> Leader {
        Leader {
            display_name: "Rajesh Kumar".into(),
            login: "a@gmail.com".into(),
            method: LoginMethod::Email,
        }
    }

    #[test]
    fn empty_store_is_anonymous() {
        let sessions = SessionStore::new(MemoryStore::default());
        assert_eq!(sessions.restore(&key(), Timestamp::now()), SessionState::Anonymous);
    }

    #[test]
    fn opened_session_restores() {
        let store = MemoryStore::default();
        let sessions = SessionStore::new(store.clone());
        let session = sessions.open(leader(), false, &key()).unwrap();

        let restored = SessionStore::new(store).restore(&key(), Timestamp::now());
        assert_eq!(restored, SessionState::Authenticated(session));
    }

    #[test]
    fn clear_removes_token_and_identity() {
        let store = MemoryStore::default();
        let sessions = SessionStore::new(store.clone());
        sessions.open(leader(), false, &key()).unwrap();

        sessions.clear();

        assert_eq!(store.get(AUTH_TOKEN_KEY), None);
        assert_eq!(store.get(USER_DATA_KEY), None);
        assert_eq!(sessions.restore(&key(), Timestamp::now()), SessionState::Anonymous);
    }

    #[test]
    fn legacy_demo_token_is_purged() {
        let store = MemoryStore::default();
        store.set(AUTH_TOKEN_KEY, "demo-token-123");

        let state = SessionStore::new(store.clone()).restore(&key(), Timestamp::now());

        assert_eq!(state, SessionState::Anonymous);
        assert_eq!(store.get(AUTH_TOKEN_KEY), None);
    }

    #[test]
    fn expired_session_is_purged() {
        let store = MemoryStore::default();
        let sessions = SessionStore::new(store.clone());
        let session = sessions.open(leader(), false, &key()).unwrap();

        let later = session.expires_at.checked_add(SignedDuration::from_secs(1)).unwrap();
        assert_eq!(sessions.restore(&key(), later), SessionState::Anonymous);
        assert_eq!(store.get(AUTH_TOKEN_KEY), None);
    }

    #[test]
    fn token_signed_with_other_key_is_rejected() {
        let store = MemoryStore::default();
        SessionStore::new(store.clone())
            .open(leader(), true, &"another-key".into())
            .unwrap();

        let state = SessionStore::new(store).restore(&key(), Timestamp::now());
        assert_eq!(state, SessionState::Anonymous);
    }
}
