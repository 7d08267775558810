use crate::api::client::{AuthApiClient, SessionResponse};
use crate::core::error::{SessionError, StoreError};
use crate::core::state::AppContext;
use crate::models::credentials::{LoginRequest, RegisterRequest};
use crate::models::session::{CurrentUser, GuestSession, Session};
use crate::stores::session_store::keys;
use crate::utils::auth::mask_token;
use crate::utils::time::current_timestamp_millis;
use rand::Rng;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Login, registration and session verification against the auth API,
/// with the resulting session persisted in the client store
///
/// A stale `verify_session` may finish after a newer `login` and clear the
/// session that login just stored. Nothing here cancels in-flight calls.
pub struct SessionClient {
    api: AuthApiClient,
    context: Arc<AppContext>,
}

impl SessionClient {
    pub fn new(api: AuthApiClient, context: Arc<AppContext>) -> Self {
        Self { api, context }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Session, SessionError> {
        let response = self
            .api
            .login(&LoginRequest { username, password })
            .await
            .inspect_err(|e| warn!(username = username, error = %e, "Login failed"))?;

        let session = self.persist(response)?;
        info!(username = %session.username, role = %session.role, "Logged in");
        Ok(session)
    }

    pub async fn register(
        &self,
        username: &str,
        email: Option<&str>,
        password: &str,
    ) -> Result<Session, SessionError> {
        let email = email.filter(|e| !e.is_empty());
        let response = self
            .api
            .register(&RegisterRequest {
                username,
                email,
                password,
            })
            .await
            .inspect_err(|e| warn!(username = username, error = %e, "Registration failed"))?;

        let session = self.persist(response)?;
        info!(username = %session.username, role = %session.role, "Account registered");
        Ok(session)
    }

    /// Ask the server whether `session_id` is still good
    ///
    /// Any failure downgrades to unauthenticated: the stored session is
    /// cleared and `None` is returned.
    pub async fn verify_session(&self, session_id: &str) -> Option<Session> {
        match self.api.verify(session_id).await {
            Ok(payload) => {
                let session = Session {
                    session_id: payload.session_id.unwrap_or_else(|| session_id.to_string()),
                    username: payload.username,
                    role: payload.role,
                };
                self.context
                    .set_current_user(CurrentUser::Member(session.clone()));
                info!(
                    username = %session.username,
                    session = %mask_token(session_id),
                    "Session verified"
                );
                Some(session)
            }
            Err(e) => {
                warn!(
                    session = %mask_token(session_id),
                    error = %e,
                    "Session verification failed, clearing stored session"
                );
                if let Err(e) = self.clear_session() {
                    error!(error = %e, "Failed to clear stored session");
                }
                None
            }
        }
    }

    /// Fabricate a guest identity locally; no request is sent
    pub fn login_as_guest(&self) -> Result<GuestSession, SessionError> {
        let suffix: [u8; 4] = rand::random();
        let guest = GuestSession {
            guest_id: format!("guest_{}_{}", current_timestamp_millis(), hex::encode(suffix)),
            guest_name: format!("GUEST_{}", rand::rng().random_range(0..10000)),
            is_guest: true,
        };

        let store = &self.context.store;
        store.set(keys::IS_GUEST, "true")?;
        store.set(keys::GUEST_ID, &guest.guest_id)?;
        store.set(keys::GUEST_NAME, &guest.guest_name)?;

        self.context.set_current_user(CurrentUser::Guest(guest.clone()));
        info!(guest_id = %guest.guest_id, guest_name = %guest.guest_name, "Guest session created");
        Ok(guest)
    }

    pub fn stored_session_id(&self) -> Option<String> {
        self.context
            .store
            .get(keys::SESSION_ID)
            .filter(|id| !id.is_empty())
    }

    /// Cached session from the store; only a hint until verified
    pub fn stored_session(&self) -> Option<Session> {
        let store = &self.context.store;
        Some(Session {
            session_id: self.stored_session_id()?,
            username: store.get(keys::USERNAME)?,
            role: store.get(keys::ROLE)?,
        })
    }

    pub fn clear_session(&self) -> Result<(), StoreError> {
        let store = &self.context.store;
        store.remove(keys::SESSION_ID)?;
        store.remove(keys::USERNAME)?;
        store.remove(keys::ROLE)?;
        self.context.clear_current_user();
        Ok(())
    }

    fn persist(&self, response: SessionResponse) -> Result<Session, SessionError> {
        let store = &self.context.store;
        store.set(keys::SESSION_ID, &response.session_id)?;
        store.set(keys::USERNAME, &response.username)?;
        store.set(keys::ROLE, &response.role)?;

        let session = Session {
            session_id: response.session_id,
            username: response.username,
            role: response.role,
        };
        self.context
            .set_current_user(CurrentUser::Member(session.clone()));
        Ok(session)
    }
}
