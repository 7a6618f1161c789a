//! # Session store — authentication state and its persistence
//!
//! [`SessionStore`] owns the signed-in [`User`] and the auth lifecycle flags.
//! Credentials are checked by an [`AuthBackend`]; the resulting token and user
//! record are persisted through a [`KeyValueStore`] under
//! [`USER_TOKEN_KEY`] and [`USER_DATA_KEY`].
//!
//! ## Lifecycle
//!
//! ```text
//! Idle ──▶ Pending ──▶ Authenticated
//!             ▲  └───▶ Unauthenticated
//!             └──────── (any operation)
//! ```
//!
//! Every async operation moves the state to [`SessionPhase::Pending`] before it
//! awaits anything and settles it on every outcome. The state lives behind a
//! mutex that is never held across an `.await`, so overlapping operations only
//! interleave at I/O points and the last one to finish wins.
//!
//! ## Failure semantics
//!
//! | Operation | Failure | Resulting state |
//! |-----------|---------|-----------------|
//! | `login` | [`StoreError::InvalidCredentials`] | unauthenticated, error set |
//! | `register` | [`StoreError::Validation`] | unauthenticated, error set |
//! | `login` / `register` | [`StoreError::Storage`] while persisting | **authenticated**, error set |
//! | `restore_session` | [`StoreError::NoStoredSession`] | unauthenticated, no error |
//! | `logout` | [`StoreError::Storage`] | reset, error set |

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{Result, StoreError};
use crate::kv::{self, KeyValueStore, USER_DATA_KEY, USER_TOKEN_KEY};
use crate::models::User;

/// What a successful login or registration hands back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthGrant {
    /// Opaque session token to persist.
    pub token: String,
    pub user: User,
}

/// Verifies credentials and creates accounts.
///
/// Required-field checks happen in [`SessionStore`] before the backend is
/// called, so implementations only decide whether the credentials are good.
pub trait AuthBackend {
    fn login(&self, email: &str, password: &str) -> impl Future<Output = Result<AuthGrant>>;
    fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<AuthGrant>>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Idle,
    Pending,
    Authenticated,
    Unauthenticated,
}

/// Snapshot of the session. `authenticated` implies `user.is_some()`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
    pub authenticated: bool,
    pub phase: SessionPhase,
}

impl SessionState {
    /// Enter [`SessionPhase::Pending`]. The user is kept until the outcome.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
        self.phase = SessionPhase::Pending;
    }

    fn authenticate(&mut self, user: User) {
        self.user = Some(user);
        self.authenticated = true;
        self.loading = false;
        self.phase = SessionPhase::Authenticated;
    }

    fn unauthenticate(&mut self, error: Option<String>) {
        self.user = None;
        self.authenticated = false;
        self.loading = false;
        self.error = error;
        self.phase = SessionPhase::Unauthenticated;
    }

    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.name.as_str())
    }
}

/// Owns authentication state and persists it through `S`.
#[derive(Clone)]
pub struct SessionStore<S, B> {
    storage: S,
    backend: B,
    state: Arc<Mutex<SessionState>>,
}

impl<S: KeyValueStore, B: AuthBackend> SessionStore<S, B> {
    pub fn new(storage: S, backend: B) -> Self {
        Self {
            storage,
            backend,
            state: Arc::default(),
        }
    }

    /// Current state, cloned.
    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().authenticated
    }

    pub fn user(&self) -> Option<User> {
        self.lock().user.clone()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, f: impl FnOnce(&mut SessionState)) {
        f(&mut self.lock());
    }

    /// Log in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        tracing::debug!(email, "login");
        self.update(SessionState::begin);

        let grant = if email.trim().is_empty() || password.is_empty() {
            Err(StoreError::InvalidCredentials)
        } else {
            self.backend.login(email, password).await
        };

        match grant {
            Ok(grant) => self.establish(grant).await,
            Err(err) => {
                tracing::info!(email, error = %err, "login rejected");
                self.update(|s| s.unauthenticate(Some(err.to_string())));
                Err(err)
            }
        }
    }

    /// Create an account and sign it in.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        tracing::debug!(email, "register");
        self.update(SessionState::begin);

        let grant = if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            Err(StoreError::validation("All fields are required"))
        } else {
            self.backend
                .register(name.trim(), email.trim(), password)
                .await
        };

        match grant {
            Ok(grant) => self.establish(grant).await,
            Err(err) => {
                self.update(|s| s.unauthenticate(Some(err.to_string())));
                Err(err)
            }
        }
    }

    /// Persist the grant, then mark the session authenticated. A failed write
    /// is reported but the user stays signed in for this run.
    async fn establish(&self, grant: AuthGrant) -> Result<User> {
        let AuthGrant { token, user } = grant;
        let persisted = self.persist(&token, &user).await;

        self.update(|s| s.authenticate(user.clone()));
        match persisted {
            Ok(()) => {
                tracing::info!(user_id = %user.id, "session established");
                Ok(user)
            }
            Err(err) => {
                tracing::warn!(user_id = %user.id, error = %err, "session not persisted");
                self.update(|s| s.error = Some(err.to_string()));
                Err(err)
            }
        }
    }

    async fn persist(&self, token: &str, user: &User) -> Result<()> {
        let user_json = serde_json::to_string(user)?;
        kv::write_pair(
            &self.storage,
            (USER_TOKEN_KEY, token),
            (USER_DATA_KEY, &user_json),
        )
        .await
    }

    /// Restore a persisted session. [`StoreError::NoStoredSession`] is the
    /// normal "not logged in" outcome and is not recorded as an error.
    pub async fn restore_session(&self) -> Result<User> {
        self.update(SessionState::begin);

        match self.read_stored().await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "session restored");
                self.update(|s| s.authenticate(user.clone()));
                Ok(user)
            }
            Err(err) => {
                let surfaced = err.is_user_facing().then(|| err.to_string());
                if surfaced.is_some() {
                    tracing::warn!(error = %err, "could not read stored session");
                }
                self.update(|s| s.unauthenticate(surfaced));
                Err(err)
            }
        }
    }

    async fn read_stored(&self) -> Result<User> {
        let token = self.storage.get(USER_TOKEN_KEY).await?;
        let data = self.storage.get(USER_DATA_KEY).await?;

        let (Some(token), Some(data)) = (token, data) else {
            return Err(StoreError::NoStoredSession);
        };
        if token.is_empty() {
            return Err(StoreError::NoStoredSession);
        }
        let mut user: User =
            serde_json::from_str(&data).map_err(|_| StoreError::NoStoredSession)?;
        user.is_authenticated = true;
        Ok(user)
    }

    /// Sign out. Both keys are removed even if one removal fails, and the
    /// in-memory state is reset either way.
    pub async fn logout(&self) -> Result<()> {
        self.update(SessionState::begin);

        let token = self.storage.remove(USER_TOKEN_KEY).await;
        let data = self.storage.remove(USER_DATA_KEY).await;

        self.update(|s| s.unauthenticate(None));
        match token.and(data) {
            Ok(()) => {
                tracing::info!("logged out");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "stored session not cleared");
                self.update(|s| s.error = Some(err.to_string()));
                Err(err)
            }
        }
    }

    pub fn clear_error(&self) {
        self.update(|s| s.error = None);
    }
}
