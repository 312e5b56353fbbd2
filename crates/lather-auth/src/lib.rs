//! # lather-auth
//!
//! Local accounts and credential storage for Lather.
//!
//! - [`CredentialStore`]: sign up, log in, log out and the current identity,
//!   kept in a [`KeyValueStore`]. Secrets are stored as salted SHA-256
//!   digests, never as entered.
//! - [`api_key`]: the vision endpoint API key, kept in the OS keychain
//!   (`keyring`) with environment and file fallbacks.
//!
//! [`KeyValueStore`]: lather_store::KeyValueStore

pub mod api_key;
mod credentials;
pub mod error;

pub use credentials::{CURRENT_USER_KEY, CredentialStore, account_key};
pub use error::AuthError;
