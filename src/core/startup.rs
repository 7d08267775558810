use crate::api::client::AuthApiClient;
use crate::core::config::Config;
use crate::core::state::AppContext;
use crate::session::client::SessionClient;
use crate::stores::session_store::SessionStore;
use crate::validation::availability::{AvailabilityChecker, ReservedNames};
use crate::view::controller::ViewController;
use crate::view::surface::View;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Fully wired client: context, session client and controller
pub struct App {
    pub context: Arc<AppContext>,
    pub sessions: Arc<SessionClient>,
    pub controller: ViewController,
}

/// Open the durable store from config and wire everything around it
pub fn build_app(config: Config, view: Arc<dyn View>) -> Result<App> {
    let store = SessionStore::open(config.storage.path.clone()).context(format!(
        "Failed to open session store at '{}'",
        config.storage.path.display()
    ))?;

    build_app_with_store(config, store, view)
}

pub fn build_app_with_store(config: Config, store: SessionStore, view: Arc<dyn View>) -> Result<App> {
    let api = AuthApiClient::new(&config.api.base_url, config.api.timeout())
        .context("Failed to create auth API client")?;

    let availability = AvailabilityChecker::new(Arc::new(ReservedNames::new(
        &config.validation.reserved_usernames,
        config.validation.availability_latency(),
    )));

    info!(
        base_url = %config.api.base_url,
        timeout_secs = config.api.timeout_secs,
        stored_keys = store.len(),
        "Client context ready"
    );

    let context = Arc::new(AppContext::new(config, store));
    let sessions = Arc::new(SessionClient::new(api, context.clone()));
    let controller = ViewController::new(context.clone(), sessions.clone(), availability, view);

    Ok(App {
        context,
        sessions,
        controller,
    })
}
