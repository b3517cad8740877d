//! Session token store.
//!
//! Holds the opaque credential proving the user is authenticated. The
//! onboarding pipeline only ever reads it (once, at submission time);
//! the login/logout flow owns the writes. Expiry is not tracked here —
//! it is discovered via a 401 from the API.

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::RwLock;

/// Cloneable handle to the current session token.
#[derive(Clone, Default)]
pub struct SessionStore {
    token: Arc<RwLock<Option<SecretString>>>,
}

impl SessionStore {
    /// Create an empty (unauthenticated) store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(SecretString::from(token.into())))),
        }
    }

    /// Snapshot of the current token, if any.
    pub async fn token(&self) -> Option<SecretString> {
        self.token.read().await.clone()
    }

    /// Replace the token. Reserved for the login flow.
    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(SecretString::from(token.into()));
    }

    /// Drop the token (logout).
    pub async fn clear(&self) {
        *self.token.write().await = None;
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }
}
