use serde::{Deserialize, Serialize};

/// Server-issued proof of authentication plus cached user attributes
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque token sent back as a bearer credential
    pub session_id: String,
    pub username: String,
    pub role: String,
}

impl Session {
    pub fn new(session_id: impl Into<String>, username: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            username: username.into(),
            role: role.into(),
        }
    }
}

/// Locally fabricated session with no server-side record
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GuestSession {
    pub guest_id: String,
    pub guest_name: String,
    pub is_guest: bool,
}

/// Whoever is currently driving the client
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CurrentUser {
    Member(Session),
    Guest(GuestSession),
}

impl CurrentUser {
    pub fn display_name(&self) -> &str {
        match self {
            CurrentUser::Member(session) => &session.username,
            CurrentUser::Guest(guest) => &guest.guest_name,
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, CurrentUser::Guest(_))
    }
}
