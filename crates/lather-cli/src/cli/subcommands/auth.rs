use clap::{Args, Subcommand};

/// Account and API key commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Create a local account and log in.
    Signup(AuthCredentialArgs),
    /// Log in to an existing account.
    Login(AuthCredentialArgs),
    /// End the current session.
    Logout,
    /// Show the current session and API key source.
    Status,
    /// Store the vision API key (OS keychain, file fallback).
    SetApiKey(AuthSetApiKeyArgs),
    /// Remove the stored vision API key.
    ClearApiKey,
}

#[derive(Clone, Debug, Args)]
pub struct AuthCredentialArgs {
    /// Account e-mail.
    #[arg(long)]
    pub email: String,
    /// Account password.
    #[arg(long)]
    pub password: String,
}

#[derive(Clone, Debug, Args)]
pub struct AuthSetApiKeyArgs {
    /// API key for the vision endpoint.
    pub key: String,
}
