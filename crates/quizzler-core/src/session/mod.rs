//! Client session state
//!
//! `SessionStore` is the single source of truth for who is logged in. It is
//! an explicit context object: construct it once, wrap it in an `Arc`, and
//! hand it to the [`ApiClient`](crate::api::ApiClient).
//!
//! State machine:
//!
//! ```text
//! Anonymous --login/register--> Authenticated
//! Authenticated --logout or 401 on a token-bearing request--> Anonymous
//! ```

pub mod observable;
pub mod storage;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::User;

pub use observable::{Observable, Subscription};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};

/// Storage key for the raw token string
pub const TOKEN_KEY: &str = "token";

/// Storage key for the JSON-encoded user
pub const USER_KEY: &str = "user";

/// Snapshot of the session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
    pub is_authenticated: bool,
}

/// Process-wide authentication state backed by durable storage.
///
/// Mutations persist first and then update memory, all under one lock, so
/// storage always mirrors memory once a call returns. Subscriber callbacks
/// run inside that lock and must not call `set_session`, `logout` or
/// `session`; the single-value getters are safe there.
pub struct SessionStore {
    token: Observable<Option<String>>,
    user: Observable<Option<User>>,
    authenticated: Observable<bool>,
    storage: Arc<dyn SessionStorage>,
    write_lock: Mutex<()>,
}

impl SessionStore {
    /// Build the store from whatever the storage already holds
    pub fn load(storage: Arc<dyn SessionStorage>) -> Result<Self> {
        let token = storage.get_item(TOKEN_KEY)?;
        let user = match storage.get_item(USER_KEY)? {
            Some(raw) => match serde_json::from_str::<Option<User>>(&raw) {
                Ok(user) => user,
                Err(e) => {
                    log::warn!("[session] Ignoring unreadable stored user: {}", e);
                    None
                }
            },
            None => None,
        };

        log::debug!("[session] Loaded session (authenticated: {})", token.is_some());

        Ok(Self {
            authenticated: Observable::new(token.is_some()),
            token: Observable::new(token),
            user: Observable::new(user),
            storage,
            write_lock: Mutex::new(()),
        })
    }

    /// Empty, non-persistent session
    pub fn in_memory() -> Self {
        Self {
            token: Observable::new(None),
            user: Observable::new(None),
            authenticated: Observable::new(false),
            storage: Arc::new(MemoryStorage::new()),
            write_lock: Mutex::new(()),
        }
    }

    pub fn get_token(&self) -> Option<String> {
        self.token.get()
    }

    pub fn user(&self) -> Option<User> {
        self.user.get()
    }

    /// Always exactly `get_token().is_some()`
    pub fn is_authenticated(&self) -> bool {
        self.token.get().is_some()
    }

    /// Consistent snapshot of token and user.
    ///
    /// Waits for any in-flight `set_session`/`logout`, so it must not be
    /// called from a subscriber callback.
    pub fn session(&self) -> Session {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let token = self.get_token();
        Session {
            is_authenticated: token.is_some(),
            token,
            user: self.user(),
        }
    }

    /// Store a freshly issued token and its user, in memory and on disk.
    pub fn set_session(&self, token: impl Into<String>, user: User) -> Result<()> {
        let user_json = serde_json::to_string(&user)?;
        self.store(token.into(), user, &user_json)
    }

    /// Like [`set_session`](Self::set_session), but persists the user exactly
    /// as the server sent it.
    pub fn set_session_json(&self, token: impl Into<String>, user: &Value) -> Result<User> {
        let parsed: User = serde_json::from_value(user.clone())
            .map_err(|e| Error::parse(format!("Unexpected user record: {}", e)))?;
        self.store(token.into(), parsed.clone(), &user.to_string())?;
        Ok(parsed)
    }

    /// Clear the session. Calling this while logged out is a no-op.
    pub fn logout(&self) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let was_authenticated = self.token.get().is_some();

        self.storage.remove_items(&[TOKEN_KEY, USER_KEY])?;

        self.set_token(None);
        self.user.set(None);

        if was_authenticated {
            log::info!("[session] Logged out");
        }
        Ok(())
    }

    pub fn subscribe_token<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Option<String>) + Send + Sync + 'static,
    {
        self.token.subscribe(callback)
    }

    pub fn subscribe_user<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Option<User>) + Send + Sync + 'static,
    {
        self.user.subscribe(callback)
    }

    pub fn subscribe_authenticated<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&bool) + Send + Sync + 'static,
    {
        self.authenticated.subscribe(callback)
    }

    fn store(&self, token: String, user: User, user_json: &str) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.storage
            .set_items(&[(TOKEN_KEY, token.as_str()), (USER_KEY, user_json)])?;

        self.user.set(Some(user));
        self.set_token(Some(token));

        log::info!("[session] Session established");
        Ok(())
    }

    // The only writer of `authenticated`, which is a notification channel;
    // reads go through the token.
    fn set_token(&self, token: Option<String>) {
        let authenticated = token.is_some();
        self.token.set(token);
        if self.authenticated.get() != authenticated {
            self.authenticated.set(authenticated);
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .field("user", &self.user())
            .finish_non_exhaustive()
    }
}
