//! Session management
//!
//! [`SessionStore`] owns the single signed-in [`Identity`] of a running
//! instance and mirrors it into durable [`Storage`] so it survives restarts.

use crate::auth::authenticator::{Authenticator, MockAuthenticator};
use crate::auth::models::{Credentials, Identity, Role};
use crate::auth::storage::Storage;
use crate::error::Result;
use std::sync::Arc;
use std::time::Duration;

/// Storage key the identity record lives under
pub const IDENTITY_KEY: &str = "user";

pub struct SessionStore {
    identity: Option<Identity>,
    signed_in_at: Option<chrono::DateTime<chrono::Utc>>,
    storage: Arc<dyn Storage>,
    authenticator: Arc<dyn Authenticator>,
    latency: Duration,
}

impl SessionStore {
    /// Create an unauthenticated store using the mock authenticator and no latency
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            identity: None,
            signed_in_at: None,
            storage,
            authenticator: Arc::new(MockAuthenticator),
            latency: Duration::ZERO,
        }
    }

    pub fn with_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = authenticator;
        self
    }

    /// Delay applied before every login resolves
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Reload an identity persisted by an earlier run.
    ///
    /// A record that no longer parses is removed and the store stays signed out.
    pub fn restore(&mut self) -> Result<()> {
        let Some(raw) = self.storage.get_item(IDENTITY_KEY)? else {
            return Ok(());
        };

        match serde_json::from_str::<Identity>(&raw) {
            Ok(identity) => {
                tracing::info!(email = %identity.email, role = %identity.role, "Restored session");
                self.identity = Some(identity);
                self.signed_in_at = Some(chrono::Utc::now());
            }
            Err(e) => {
                tracing::warn!("Discarding unreadable session record: {}", e);
                self.storage.remove_item(IDENTITY_KEY)?;
            }
        }
        Ok(())
    }

    /// Sign in. Returns `Ok(false)` when the credentials are rejected.
    pub async fn login(&mut self, email: &str, password: &str, role: Role) -> Result<bool> {
        self.login_with(&Credentials::new(email, password, role)).await
    }

    pub async fn login_with(&mut self, credentials: &Credentials) -> Result<bool> {
        match self.attempt().run(credentials).await {
            Some(identity) => {
                self.complete_login(identity)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Start a login that can be awaited without borrowing the store.
    ///
    /// Pair with [`complete_login`](Self::complete_login) so a shared store is
    /// only locked for the mutation, not for the simulated latency.
    pub fn attempt(&self) -> LoginAttempt {
        LoginAttempt {
            authenticator: Arc::clone(&self.authenticator),
            latency: self.latency,
        }
    }

    /// Persist an authenticated identity and make it current
    pub fn complete_login(&mut self, identity: Identity) -> Result<()> {
        let record = serde_json::to_string(&identity)?;
        self.storage.set_item(IDENTITY_KEY, &record)?;

        tracing::info!(email = %identity.email, role = %identity.role, "Logged in");
        self.identity = Some(identity);
        self.signed_in_at = Some(chrono::Utc::now());
        Ok(())
    }

    /// Sign out. Calling it while signed out changes nothing.
    ///
    /// The stored record goes first; if that fails the session stays signed in.
    pub fn logout(&mut self) -> Result<()> {
        self.storage.remove_item(IDENTITY_KEY)?;

        if let Some(identity) = self.identity.take() {
            tracing::info!(email = %identity.email, "Logged out");
        }
        self.signed_in_at = None;
        Ok(())
    }

    pub fn current_identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// When the current identity signed in (or was restored) in this process
    pub fn signed_in_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.signed_in_at
    }
}

/// The credential check of a login, detached from the store
pub struct LoginAttempt {
    authenticator: Arc<dyn Authenticator>,
    latency: Duration,
}

impl LoginAttempt {
    /// Wait out the simulated latency, then check the credentials
    pub async fn run(self, credentials: &Credentials) -> Option<Identity> {
        tracing::info!(email = %credentials.email, role = %credentials.role, "Login attempt");

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let identity = self.authenticator.authenticate(credentials);
        if identity.is_none() {
            tracing::warn!(email = %credentials.email, "Login rejected");
        }
        identity
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("identity", &self.identity)
            .field("signed_in_at", &self.signed_in_at)
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}
