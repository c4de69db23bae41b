//! Client-side session store.
//!
//! [`SessionStore`] is the single source of truth for "is the current user
//! logged in, and who are they". It persists the raw bearer token through a
//! [`TokenStorage`] collaborator and derives the current user from the
//! token's claims.
//!
//! Lifecycle:
//!
//! ```text
//! Initializing --recover_on_startup--> Unauthenticated | Authenticated
//! Unauthenticated --login(ok)--> Authenticated
//! Authenticated --logout / login(err)--> Unauthenticated
//! ```
//!
//! Nothing re-enters `Initializing`. Mutators take `&mut self`, so a host
//! that shares the store across threads must put it behind a mutex.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;

use crate::token::{Claims, DecodeError, TokenCodec};

/// Storage key under which the raw token is persisted.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

// ---------------------------------------------------------------------------
// Storage collaborator
// ---------------------------------------------------------------------------

/// Durable key-value storage for the raw token.
///
/// Treated as synchronous and infallible: implementations deal with their own
/// I/O failures.
pub trait TokenStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// Process-local storage, used by tests and ephemeral clients.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// JSON key-value file, written with 0600 permissions on Unix.
///
/// Read failures are treated as an empty store and write failures are logged
/// and dropped, so a broken file degrades to "no session" rather than an
/// error.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn load(&self) -> HashMap<String, String> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read session file");
                return HashMap::new();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "Ignoring unparseable session file");
            HashMap::new()
        })
    }

    fn save(&self, entries: &HashMap<String, String>) {
        if let Err(e) = self.try_save(entries) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to write session file");
        }
    }

    fn try_save(&self, entries: &HashMap<String, String>) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(entries)?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        // `mode` only applies on create; tighten a pre-existing file too.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(contents.as_bytes())
    }
}

impl TokenStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        let mut entries = self.load();
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries);
    }

    fn remove(&mut self, key: &str) {
        let mut entries = self.load();
        if entries.remove(key).is_some() {
            self.save(&entries);
        }
    }
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// The logged-in staff member, derived from token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            name: claims.name,
            email: claims.email,
            role: claims.role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Initializing,
    Unauthenticated,
    Authenticated(CurrentUser),
}

/// Read-only view of the session handed to the route guard and views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub is_authenticated: bool,
    pub is_loading: bool,
}

/// Why an explicit [`SessionStore::login`] was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Token expired at {exp}")]
    Expired { exp: i64 },
}

/// Authentication state plus the storage it persists to.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    codec: TokenCodec,
    phase: Phase,
}

impl<S: TokenStorage> SessionStore<S> {
    /// Create a store in the `Initializing` phase. Call
    /// [`Self::recover_on_startup`] before making any routing decision.
    pub fn new(storage: S, codec: TokenCodec) -> Self {
        Self {
            storage,
            codec,
            phase: Phase::Initializing,
        }
    }

    /// Restore the session from the persisted token.
    ///
    /// Malformed and expired tokens are cleared from storage and silently
    /// downgrade to unauthenticated. Only the first call has any effect.
    pub fn recover_on_startup(&mut self) {
        if self.phase != Phase::Initializing {
            tracing::debug!("Session already recovered, skipping");
            return;
        }

        let Some(token) = self.storage.get(AUTH_TOKEN_KEY) else {
            tracing::debug!("No persisted token");
            self.phase = Phase::Unauthenticated;
            return;
        };

        match self.authenticate(&token) {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "Session recovered");
                self.phase = Phase::Authenticated(user);
            }
            Err(e) => {
                tracing::info!(error = %e, "Discarding persisted token");
                self.clear();
            }
        }
    }

    /// Persist `token` and authenticate with it.
    ///
    /// On failure the store is reset exactly as by [`Self::logout`] before
    /// the error is returned, so it never stays half-authenticated.
    pub fn login(&mut self, token: &str) -> Result<CurrentUser, SessionError> {
        self.storage.set(AUTH_TOKEN_KEY, token);

        match self.authenticate(token) {
            Ok(user) => {
                tracing::info!(user_id = %user.id, role = %user.role, "Logged in");
                self.phase = Phase::Authenticated(user.clone());
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Login rejected, clearing session");
                self.logout();
                Err(e)
            }
        }
    }

    /// Forget the token and the user. Idempotent.
    pub fn logout(&mut self) {
        self.clear();
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.phase, Phase::Authenticated(_))
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Initializing
    }

    pub fn current_user(&self) -> Option<&CurrentUser> {
        match &self.phase {
            Phase::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            is_authenticated: self.is_authenticated(),
            is_loading: self.is_loading(),
        }
    }

    /// The persisted token, when authenticated. Used as the bearer credential.
    pub fn raw_token(&self) -> Option<String> {
        if self.is_authenticated() {
            self.storage.get(AUTH_TOKEN_KEY)
        } else {
            None
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn authenticate(&self, token: &str) -> Result<CurrentUser, SessionError> {
        let claims = self.codec.decode(token)?;
        if claims.is_expired_at(chrono::Utc::now().timestamp()) {
            return Err(SessionError::Expired { exp: claims.exp });
        }
        Ok(claims.into())
    }

    fn clear(&mut self) {
        self.storage.remove(AUTH_TOKEN_KEY);
        self.phase = Phase::Unauthenticated;
    }
}
