use crate::core::error::FieldIssue;
use crate::validation::fields::{ValidationResult, USERNAME_MIN_LEN};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Async capability answering "is this username still free?"
///
/// The registration form only depends on this trait, so a network-backed
/// implementation can replace the local reserved list without touching callers.
#[async_trait]
pub trait UsernameAvailability: Send + Sync {
    async fn is_available(&self, username: &str) -> anyhow::Result<bool>;
}

/// Local check against a fixed set of reserved names, with simulated latency
pub struct ReservedNames {
    names: HashSet<String>,
    latency: Duration,
}

impl ReservedNames {
    pub fn new<I, S>(names: I, latency: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|name| name.as_ref().to_lowercase())
                .collect(),
            latency,
        }
    }
}

#[async_trait]
impl UsernameAvailability for ReservedNames {
    async fn is_available(&self, username: &str) -> anyhow::Result<bool> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(!self.names.contains(&username.to_lowercase()))
    }
}

/// Runs the injected availability capability and turns its answer into field feedback
#[derive(Clone)]
pub struct AvailabilityChecker {
    capability: Arc<dyn UsernameAvailability>,
}

impl AvailabilityChecker {
    pub fn new(capability: Arc<dyn UsernameAvailability>) -> Self {
        Self { capability }
    }

    /// Input shorter than the minimum length is left Neutral without asking
    pub async fn check_username_availability(&self, username: &str) -> ValidationResult {
        if username.chars().count() < USERNAME_MIN_LEN {
            return ValidationResult::neutral("");
        }

        match self.capability.is_available(username).await {
            Ok(true) => {
                debug!(username = username, "Username available");
                ValidationResult::valid("USERNAME AVAILABLE")
            }
            Ok(false) => {
                debug!(username = username, "Username taken");
                ValidationResult::invalid(FieldIssue::Taken)
            }
            Err(e) => {
                warn!(username = username, error = %e, "Username availability check failed");
                ValidationResult::neutral("COULD NOT CHECK USERNAME")
            }
        }
    }
}
