// Application context (AppContext)

use crate::core::config::Config;
use crate::models::session::CurrentUser;
use crate::stores::session_store::SessionStore;
use std::sync::{Arc, RwLock};

/// State shared by the validator, session client and view controller
///
/// Built once at startup and handed out by `Arc`. The store is the only
/// durable state; `current_user` is an in-memory cache of the last
/// confirmed identity and is never trusted without a verify call.
pub struct AppContext {
    /// Configuration
    pub config: Arc<Config>,

    /// Durable client storage
    pub store: Arc<SessionStore>,

    current_user: RwLock<Option<CurrentUser>>,
}

impl AppContext {
    pub fn new(config: Config, store: SessionStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            current_user: RwLock::new(None),
        }
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        self.current_user
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn set_current_user(&self, user: CurrentUser) {
        if let Ok(mut guard) = self.current_user.write() {
            *guard = Some(user);
        }
    }

    pub fn clear_current_user(&self) {
        if let Ok(mut guard) = self.current_user.write() {
            *guard = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::Session;

    #[test]
    fn test_current_user_cache() {
        let context = AppContext::new(Config::default(), SessionStore::in_memory());
        assert!(context.current_user().is_none());

        context.set_current_user(CurrentUser::Member(Session::new("abc", "bob", "player")));
        assert_eq!(context.current_user().unwrap().display_name(), "bob");

        context.clear_current_user();
        assert!(context.current_user().is_none());
    }
}
