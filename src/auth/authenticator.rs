//! Credential checking

use crate::auth::models::{Credentials, Identity};

/// Identifier handed to every mock identity
pub const MOCK_IDENTITY_ID: &str = "1";

/// Turns credentials into an identity, or rejects them.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, credentials: &Credentials) -> Option<Identity>;
}

/// Accepts any credentials and synthesizes an identity for the requested role
#[derive(Debug, Clone, Copy, Default)]
pub struct MockAuthenticator;

impl Authenticator for MockAuthenticator {
    fn authenticate(&self, credentials: &Credentials) -> Option<Identity> {
        Some(Identity::new(
            MOCK_IDENTITY_ID,
            credentials.role.canned_name(),
            credentials.email.clone(),
            credentials.role,
        ))
    }
}
