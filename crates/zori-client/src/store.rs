//! Session storage and credentials
//!
//! [`SessionStore`] is the seam over whatever key/value persistence the host
//! provides (browser localStorage, a mobile keychain shim, plain memory in
//! tests). [`CredentialStore`] is the typed facade the rest of the client
//! uses: tokens and the cached user record, with a single `clear` that wipes
//! everything on logout or a 401.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use zori_core::auth::{AuthTokens, UserRecord};

/// Storage key for the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Storage key for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
/// Storage key for the cached user record (JSON).
pub const USER_KEY: &str = "user";

/// String key/value store with last-write-wins semantics.
///
/// Implementations must tolerate concurrent calls but need no transactional
/// guarantees; every consumer treats reads as possibly stale.
pub trait SessionStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str);
    /// Remove a value if present.
    fn remove(&self, key: &str);
}

/// In-memory session store. The default for native hosts and tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}

/// Typed access to the stored credentials.
#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn SessionStore>,
}

impl CredentialStore {
    /// Wrap a session store.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// The stored access token, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.store.get(ACCESS_TOKEN_KEY)
    }

    /// The stored refresh token, if any.
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.store.get(REFRESH_TOKEN_KEY)
    }

    /// Store a freshly issued token pair.
    pub fn set_tokens(&self, tokens: &AuthTokens) {
        self.store.set(ACCESS_TOKEN_KEY, &tokens.access_token);
        self.store.set(REFRESH_TOKEN_KEY, &tokens.refresh_token);
    }

    /// The cached user record, if present and parseable.
    #[must_use]
    pub fn user(&self) -> Option<UserRecord> {
        let raw = self.store.get(USER_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    /// Cache the user record.
    pub fn set_user(&self, user: &UserRecord) {
        if let Ok(json) = serde_json::to_string(user) {
            self.store.set(USER_KEY, &json);
        }
    }

    /// Whether an access token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    /// Wipe tokens and the cached user record. Called on logout and on any
    /// 401 from an authenticated endpoint.
    pub fn clear(&self) {
        self.store.remove(ACCESS_TOKEN_KEY);
        self.store.remove(REFRESH_TOKEN_KEY);
        self.store.remove(USER_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> AuthTokens {
        AuthTokens {
            access_token: "at-1".into(),
            refresh_token: "rt-1".into(),
            token_type: "Bearer".into(),
            expires_in: 3600,
        }
    }

    #[test]
    fn stores_and_clears_credentials() {
        let store = Arc::new(MemorySessionStore::new());
        let creds = CredentialStore::new(store.clone());

        assert!(!creds.is_authenticated());
        creds.set_tokens(&tokens());
        creds.set_user(&UserRecord {
            person_id: "p-1".into(),
            email: "jane@example.com".into(),
            display_name: "Jane".into(),
            avatar_url: None,
        });

        assert!(creds.is_authenticated());
        assert_eq!(creds.access_token().as_deref(), Some("at-1"));
        assert_eq!(creds.user().map(|u| u.email), Some("jane@example.com".into()));

        creds.clear();
        assert!(!creds.is_authenticated());
        assert!(store.get(ACCESS_TOKEN_KEY).is_none());
        assert!(store.get(REFRESH_TOKEN_KEY).is_none());
        assert!(store.get(USER_KEY).is_none());
    }

    #[test]
    fn corrupt_user_record_reads_as_none() {
        let store = Arc::new(MemorySessionStore::new());
        store.set(USER_KEY, "not json");
        let creds = CredentialStore::new(store);
        assert!(creds.user().is_none());
    }
}
