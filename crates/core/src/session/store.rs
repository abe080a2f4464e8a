//! Session store: authentication lifecycle and paired persistence.

use tokio::sync::watch;
use tracing::{info, warn};

use bankview_shared::{AppError, AppResult};

use super::storage::{SessionStorage, KEY_AUTH_TOKEN, KEY_CURRENT_USER};
use super::types::{
    AuthResponse, Credentials, ForgotPasswordResponse, RegisterData, ResetPasswordResponse,
    UserProfile,
};

/// Generic response shown for any forgot-password failure, so a failed
/// request is indistinguishable from a successful one (no account
/// enumeration).
const FORGOT_PASSWORD_GENERIC: &str = "If that email exists, a reset link was sent.";

/// Remote auth endpoints (login, register, password flows).
///
/// Implemented by the IO edge (`bankview-client`); stubbed in tests.
pub trait AuthApi {
    /// `POST auth/login`.
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = AppResult<AuthResponse>> + Send;
    /// `POST auth/register`.
    fn register(&self, data: &RegisterData)
        -> impl Future<Output = AppResult<AuthResponse>> + Send;
    /// `POST auth/forgot-password`.
    fn forgot_password(
        &self,
        email: &str,
    ) -> impl Future<Output = AppResult<ForgotPasswordResponse>> + Send;
    /// `POST auth/reset-password`.
    fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> impl Future<Output = AppResult<ResetPasswordResponse>> + Send;
}

/// Snapshot of the session broadcast to observers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// The current identity, when authenticated.
    pub user: Option<UserProfile>,
    /// True iff both identity and token are present.
    pub authenticated: bool,
}

/// Holds and persists the authenticated identity and token.
///
/// Identity and token are written and cleared together: partial state
/// (token without identity or vice versa) is never observable.
pub struct SessionStore<A, S> {
    api: A,
    storage: S,
    user: Option<UserProfile>,
    token: Option<String>,
    tx: watch::Sender<SessionState>,
}

impl<A: AuthApi, S: SessionStorage> SessionStore<A, S> {
    /// Creates a signed-out store.
    pub fn new(api: A, storage: S) -> Self {
        let (tx, _) = watch::channel(SessionState::default());
        Self {
            api,
            storage,
            user: None,
            token: None,
            tx,
        }
    }

    /// Registers an observer of session changes.
    ///
    /// The receiver sees the current state immediately and every later
    /// login/logout.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    /// Returns true iff both identity and token are present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    /// Returns the current identity, when authenticated.
    #[must_use]
    pub fn current_user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Returns the opaque auth token, when authenticated.
    #[must_use]
    pub fn auth_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Restores persisted state on process start.
    ///
    /// Pairing is STRICT: the session is restored only when both the token
    /// and the identity are present. A lone leftover entry is cleared and
    /// the session stays signed out, upholding the pairing invariant.
    pub fn restore(&mut self) -> AppResult<()> {
        let token = self.storage.get(KEY_AUTH_TOKEN)?;
        let user_json = self.storage.get(KEY_CURRENT_USER)?;

        match (token, user_json) {
            (Some(token), Some(user_json)) => match serde_json::from_str(&user_json) {
                Ok(user) => {
                    self.set_session(Some(user), Some(token));
                    info!("session restored from storage");
                    Ok(())
                }
                Err(err) => {
                    warn!(%err, "persisted identity unreadable; clearing session");
                    self.clear_storage();
                    Ok(())
                }
            },
            (None, None) => Ok(()),
            _ => {
                warn!("partial persisted session found; clearing");
                self.clear_storage();
                Ok(())
            }
        }
    }

    /// Logs in against the remote auth endpoint.
    ///
    /// On a response carrying both token and identity, persists and installs
    /// them atomically as a pair. Any other response leaves the session
    /// untouched; the server-provided message is in the returned response.
    pub async fn login(&mut self, credentials: &Credentials) -> AppResult<AuthResponse> {
        let response = self.api.login(credentials).await?;
        self.apply_auth_response(&response)?;
        Ok(response)
    }

    /// Registers a new user; a successful registration auto-authenticates
    /// with the same contract as [`SessionStore::login`].
    pub async fn register(&mut self, data: &RegisterData) -> AppResult<AuthResponse> {
        let response = self.api.register(data).await?;
        self.apply_auth_response(&response)?;
        Ok(response)
    }

    /// Clears persistent storage and in-memory state unconditionally.
    ///
    /// Always succeeds; the signed-out state is broadcast so UI surfaces can
    /// return to the unauthenticated entry point.
    pub fn logout(&mut self) {
        self.clear_storage();
        self.set_session(None, None);
        info!("signed out");
    }

    /// Requests a password-reset email.
    ///
    /// Never fails from the caller's perspective: transport errors and
    /// non-success responses are downgraded to a generic success-shaped
    /// message so the outcome reveals nothing about account existence.
    pub async fn forgot_password(&self, email: &str) -> ForgotPasswordResponse {
        match self.api.forgot_password(email.trim()).await {
            Ok(response) if response.success => response,
            Ok(_) | Err(_) => {
                warn!("forgot-password request failed; returning generic response");
                ForgotPasswordResponse {
                    success: true,
                    message: FORGOT_PASSWORD_GENERIC.to_string(),
                    reset_token: None,
                }
            }
        }
    }

    /// Completes a password reset. Unlike forgot-password, failures here ARE
    /// surfaced distinctly to the caller.
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> AppResult<ResetPasswordResponse> {
        self.api.reset_password(token, new_password).await
    }

    /// Installs a successful auth response: both values persisted, then both
    /// installed in memory, then observers notified.
    fn apply_auth_response(&mut self, response: &AuthResponse) -> AppResult<()> {
        if !response.success {
            return Ok(());
        }
        let (Some(token), Some(user)) = (&response.token, &response.user) else {
            // Success without the full pair: treat as not authenticated
            // rather than install partial state.
            warn!("auth response success without token/user pair; ignoring");
            return Ok(());
        };

        let user_json = serde_json::to_string(user)?;
        self.storage.put(KEY_AUTH_TOKEN, token)?;
        if let Err(err) = self.storage.put(KEY_CURRENT_USER, &user_json) {
            // Keep the pair invariant: roll the token back rather than leave
            // half a session behind.
            let _ = self.storage.remove(KEY_AUTH_TOKEN);
            return Err(err);
        }

        self.set_session(Some(user.clone()), Some(token.clone()));
        info!(user_id = user.id, "authenticated");
        Ok(())
    }

    fn set_session(&mut self, user: Option<UserProfile>, token: Option<String>) {
        self.user = user;
        self.token = token;
        self.tx.send_replace(SessionState {
            user: self.user.clone(),
            authenticated: self.is_authenticated(),
        });
    }

    fn clear_storage(&mut self) {
        if let Err(err) = self.storage.remove(KEY_AUTH_TOKEN) {
            warn!(%err, "failed to clear persisted token");
        }
        if let Err(err) = self.storage.remove(KEY_CURRENT_USER) {
            warn!(%err, "failed to clear persisted identity");
        }
    }
}
