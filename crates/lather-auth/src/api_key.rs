//! Vision endpoint API key storage.
//!
//! Lookup order: OS keychain → `LATHER_VISION__API_KEY` → `<data dir>/api_key`.

use std::fs;
use std::path::{Path, PathBuf};

use keyring::credential::CredentialPersistence;
use serde::Serialize;

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "lather-cli";
const KEYRING_USER: &str = "vision-api-key";
const API_KEY_ENV: &str = "LATHER_VISION__API_KEY";
const API_KEY_FILE_NAME: &str = "api_key";

/// Where a resolved key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeySource {
    Keyring,
    Env,
    File,
}

impl KeySource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyring => "keyring",
            Self::Env => "env",
            Self::File => "file",
        }
    }
}

/// Keyring service name. `LATHER_KEYRING_SERVICE` overrides it so tests
/// never touch the real entry.
fn keyring_service() -> String {
    std::env::var("LATHER_KEYRING_SERVICE")
        .unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

fn keyring_entry() -> Option<keyring::Entry> {
    keyring::Entry::new(&keyring_service(), KEYRING_USER)
        .map_err(|error| tracing::debug!(%error, "keyring unavailable"))
        .ok()
}

/// Whether credentials from a backend with this lifetime outlive the
/// process that stored them.
const fn outlives_process(persistence: &CredentialPersistence) -> bool {
    !matches!(
        persistence,
        CredentialPersistence::EntryOnly | CredentialPersistence::ProcessOnly
    )
}

/// A keyring entry that a later process can read, or `None` if the platform
/// keyring only keeps credentials in memory.
fn durable_keyring_entry() -> Option<keyring::Entry> {
    let persistence = keyring::default::default_credential_builder().persistence();
    if !outlives_process(&persistence) {
        tracing::debug!("keyring does not persist credentials");
        return None;
    }
    keyring_entry()
}

/// Store the API key in the OS keychain, falling back to a `0600` file
/// under `data_dir`.
///
/// The keychain is only used when its backend persists credentials and a
/// freshly opened entry reads the key back.
///
/// # Errors
///
/// Returns [`AuthError::KeyStore`] if the key is empty, or if the keychain
/// is unusable and the file cannot be written.
pub fn store(key: &str, data_dir: &Path) -> Result<KeySource, AuthError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(AuthError::KeyStore("API key is empty".into()));
    }

    if let Some(entry) = durable_keyring_entry() {
        match entry.set_password(key) {
            Ok(()) if reads_back(key) => {
                tracing::debug!("API key stored in keyring");
                return Ok(KeySource::Keyring);
            }
            Ok(()) => {
                tracing::warn!("keyring did not keep the API key; falling back to file");
                if let Err(error) = entry.delete_credential() {
                    tracing::debug!(%error, "no keyring entry removed");
                }
            }
            Err(error) => {
                tracing::warn!(%error, "keyring store failed; falling back to file");
            }
        }
    }

    store_file(key, &key_path(data_dir))?;
    Ok(KeySource::File)
}

/// Read the key through a new entry, the way [`load`] will.
fn reads_back(key: &str) -> bool {
    keyring_entry()
        .and_then(|entry| entry.get_password().ok())
        .is_some_and(|stored| stored == key)
}

/// Load the API key and report where it came from.
#[must_use]
pub fn load(data_dir: &Path) -> Option<(String, KeySource)> {
    if let Some(entry) = keyring_entry()
        && let Ok(key) = entry.get_password()
        && !key.is_empty()
    {
        return Some((key, KeySource::Keyring));
    }

    if let Ok(key) = std::env::var(API_KEY_ENV)
        && !key.is_empty()
    {
        return Some((key, KeySource::Env));
    }

    load_file(&key_path(data_dir)).map(|key| (key, KeySource::File))
}

/// Which tier a key would be loaded from, for status display.
#[must_use]
pub fn detect_source(data_dir: &Path) -> Option<KeySource> {
    load(data_dir).map(|(_, source)| source)
}

/// Remove the stored key from the keychain and the file. The environment
/// variable is left alone.
///
/// # Errors
///
/// Returns [`AuthError::KeyStore`] if the key file exists but cannot be removed.
pub fn delete(data_dir: &Path) -> Result<(), AuthError> {
    if let Some(entry) = keyring_entry()
        && let Err(error) = entry.delete_credential()
    {
        tracing::debug!(%error, "no keyring entry removed");
    }
    delete_file(&key_path(data_dir))
}

// --- File tier ---

fn key_path(data_dir: &Path) -> PathBuf {
    data_dir.join(API_KEY_FILE_NAME)
}

fn store_file(key: &str, path: &Path) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AuthError::KeyStore(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(path, key)
        .map_err(|e| AuthError::KeyStore(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::KeyStore(format!("chmod {}: {e}", path.display())))?;
    }

    tracing::debug!(path = %path.display(), "API key stored in file");
    Ok(())
}

fn load_file(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn delete_file(path: &Path) -> Result<(), AuthError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AuthError::KeyStore(format!(
            "failed to delete {}: {e}",
            path.display()
        ))),
    }
}
