// Session and token persistence. Two states: unauthenticated and
// authenticated. A token only becomes a session after the
// current-account lookup succeeds; a failed lookup clears whatever was
// stored so the next start does not retry a dead token.

use crate::api::{Account, ApiClient, FollowApi};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

/// Where the token string lives between runs. An explicit value rather
/// than a fixed path so tests can point it at a temp directory.
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// The well-known dotfile in the user's home directory.
    pub fn default_location() -> Self {
        let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        TokenStore {
            path: dir.join(".gitflock_token"),
        }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        TokenStore { path: path.into() }
    }

    pub fn save(&self, token: &str) -> Result<()> {
        std::fs::write(&self.path, token).context("Failed to persist token")?;
        Ok(())
    }

    /// The stored token, if any. Missing file and blank content both
    /// read as no token.
    pub fn load(&self) -> Option<String> {
        let data = std::fs::read_to_string(&self.path).ok()?;
        let token = data.trim().to_string();
        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }

    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).context("Failed to clear stored token"),
        }
    }
}

/// An authenticated session: the token, the account it resolved to and
/// the client built around it.
pub struct Session {
    pub token: String,
    pub account: Account,
    pub api: ApiClient,
}

impl Session {
    /// Validate a submitted token and persist it on success.
    pub fn establish(token: String, store: &TokenStore) -> Result<Session> {
        let api = ApiClient::from_env(&token)?;
        let account = validate_token(&api, &token, store)?;
        Ok(Session {
            token,
            account,
            api,
        })
    }

    /// Pick up a persisted token from a previous run, if there is one.
    /// A stored token that fails validation comes back as an error and
    /// is cleared from the store.
    pub fn resume(store: &TokenStore) -> Result<Option<Session>> {
        match store.load() {
            Some(token) => Session::establish(token, store).map(Some),
            None => Ok(None),
        }
    }

    pub fn logout(self, store: &TokenStore) -> Result<()> {
        debug!("logged out {}", self.account.login);
        store.clear()
    }
}

/// Resolve the current account for `token`. Success persists the token;
/// failure clears the store and propagates the error.
pub fn validate_token<A: FollowApi>(api: &A, token: &str, store: &TokenStore) -> Result<Account> {
    match api.current_user() {
        Ok(account) => {
            store.save(token)?;
            debug!("authenticated as {}", account.login);
            Ok(account)
        }
        Err(err) => {
            let _ = store.clear();
            debug!("token validation failed: {}", err);
            Err(err).context("token validation failed")
        }
    }
}
