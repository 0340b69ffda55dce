//! Session Lifecycle
//!
//! The session is an explicit value owned by the app shell: it starts as
//! `Loading`, becomes `SignedIn` after a verified token or a login, and
//! returns to `SignedOut` on logout or when the stored token is rejected.

use log::{info, warn};

use crate::auth::{AuthApi, AuthUser};
use crate::error::{ApiError, ApiResult};
use crate::storage::{KeyValueStorage, TOKEN_KEY};
use crate::transport::HttpTransport;
use crate::validation::Credentials;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Loading,
    SignedOut,
    SignedIn(AuthUser),
}

impl SessionState {
    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            SessionState::SignedIn(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }
}

/// Drives session transitions; the token lives in key-value storage
#[derive(Clone)]
pub struct Authenticator<T, S> {
    api: AuthApi<T>,
    storage: S,
}

impl<T: HttpTransport, S: KeyValueStorage> Authenticator<T, S> {
    pub fn new(api: AuthApi<T>, storage: S) -> Self {
        Self { api, storage }
    }

    /// Verify a stored token. A rejected token is discarded.
    pub async fn restore(&self) -> SessionState {
        let token = match self.storage.get(TOKEN_KEY) {
            Ok(Some(token)) => token,
            Ok(None) => return SessionState::SignedOut,
            Err(e) => {
                warn!("[AUTH] token storage unavailable: {}", e);
                return SessionState::SignedOut;
            }
        };
        match self.api.verify(&token).await {
            Ok(user) => {
                info!("[AUTH] session restored for {}", user.email);
                SessionState::SignedIn(user)
            }
            Err(e) => {
                warn!("[AUTH] stored token rejected: {}", e);
                self.sign_out()
            }
        }
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> ApiResult<SessionState> {
        let resp = self.api.login(credentials).await?;
        self.storage
            .set(TOKEN_KEY, &resp.token)
            .map_err(|e| ApiError::transport(e.to_string()))?;
        info!("[AUTH] signed in {}", resp.user.email);
        Ok(SessionState::SignedIn(resp.user))
    }

    /// Register without signing in
    pub async fn sign_up(&self, credentials: &Credentials) -> ApiResult<()> {
        self.api.register(credentials).await
    }

    pub fn sign_out(&self) -> SessionState {
        if let Err(e) = self.storage.remove(TOKEN_KEY) {
            warn!("[AUTH] could not clear token: {}", e);
        }
        SessionState::SignedOut
    }
}
