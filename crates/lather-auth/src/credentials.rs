use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use lather_store::KeyValueStore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::AuthError;

/// Key holding the identity of the logged-in account.
pub const CURRENT_USER_KEY: &str = "currentUser";

const SALT_LEN: usize = 16;

/// Store key for the account record of `identity`.
#[must_use]
pub fn account_key(identity: &str) -> String {
    format!("user_{identity}")
}

#[derive(Debug, Serialize, Deserialize)]
struct AccountRecord {
    salt: String,
    digest: String,
}

impl AccountRecord {
    fn new(secret: &str) -> Result<Self, AuthError> {
        let mut salt = [0u8; SALT_LEN];
        getrandom::fill(&mut salt).map_err(|e| AuthError::Entropy(e.to_string()))?;
        Ok(Self {
            salt: STANDARD.encode(salt),
            digest: STANDARD.encode(digest(&salt, secret)),
        })
    }

    fn matches(&self, identity: &str, secret: &str) -> Result<bool, AuthError> {
        let malformed = |detail: String| AuthError::MalformedAccount {
            identity: identity.to_string(),
            detail,
        };
        let salt = STANDARD
            .decode(&self.salt)
            .map_err(|e| malformed(format!("salt: {e}")))?;
        let expected = STANDARD
            .decode(&self.digest)
            .map_err(|e| malformed(format!("digest: {e}")))?;
        Ok(digest(&salt, secret) == expected)
    }
}

fn digest(salt: &[u8], secret: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(secret.as_bytes());
    hasher.finalize().to_vec()
}

/// Local accounts keyed by e-mail style identity.
///
/// Records live under [`account_key`]; the session under [`CURRENT_USER_KEY`].
#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}

impl CredentialStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Create an account and make it current.
    ///
    /// Returns `false` without writing anything if the identity is empty or
    /// has no `@`, the secret is empty, or the account already exists.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the store cannot be read or written.
    pub fn sign_up(&self, identity: &str, secret: &str) -> Result<bool, AuthError> {
        let identity = identity.trim();
        if identity.is_empty() || !identity.contains('@') || secret.is_empty() {
            tracing::debug!("sign-up rejected: malformed identity or empty secret");
            return Ok(false);
        }

        let record = serde_json::to_value(AccountRecord::new(secret)?)
            .map_err(lather_store::StorageError::from)?;
        let mut pending = Some(record);
        let mut created = false;
        self.store.update(&account_key(identity), &mut |existing| {
            if existing.is_some() {
                return Ok(None);
            }
            created = true;
            Ok(pending.take())
        })?;
        if !created {
            tracing::debug!(identity, "sign-up rejected: account exists");
            return Ok(false);
        }

        self.store.set_string(CURRENT_USER_KEY, identity)?;
        tracing::info!(identity, "account created");
        Ok(true)
    }

    /// Log in as `identity`. Returns `true` and makes the account current
    /// iff the account exists and `secret` matches.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedAccount`] if the stored record cannot be
    /// read back, or [`AuthError::Storage`] on store failure.
    pub fn login(&self, identity: &str, secret: &str) -> Result<bool, AuthError> {
        let identity = identity.trim();
        let Some(value) = self.store.get(&account_key(identity))? else {
            tracing::debug!(identity, "login rejected: no such account");
            return Ok(false);
        };

        let record: AccountRecord =
            serde_json::from_value(value).map_err(|e| AuthError::MalformedAccount {
                identity: identity.to_string(),
                detail: e.to_string(),
            })?;

        if !record.matches(identity, secret)? {
            tracing::debug!(identity, "login rejected: wrong secret");
            return Ok(false);
        }
        self.store.set_string(CURRENT_USER_KEY, identity)?;
        tracing::info!(identity, "logged in");
        Ok(true)
    }

    /// Clear the current session. Accounts are kept.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the store cannot be written.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.remove(CURRENT_USER_KEY)?;
        Ok(())
    }

    /// The identity of the logged-in account, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the store cannot be read.
    pub fn current_identity(&self) -> Result<Option<String>, AuthError> {
        Ok(self
            .store
            .get_string(CURRENT_USER_KEY)?
            .filter(|s| !s.is_empty()))
    }

    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the store cannot be read.
    pub fn is_logged_in(&self) -> Result<bool, AuthError> {
        Ok(self.current_identity()?.is_some())
    }
}
