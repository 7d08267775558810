use crate::core::error::StoreError;
use crate::wal::wal::{Wal, WalOperation};
use dashmap::DashMap;
use std::path::PathBuf;
use tracing::{debug, info};

/// Keys shared with already deployed clients; names must stay stable
pub mod keys {
    pub const SESSION_ID: &str = "session_id";
    pub const USERNAME: &str = "username";
    pub const ROLE: &str = "role";
    pub const IS_GUEST: &str = "is_guest";
    pub const GUEST_ID: &str = "guest_id";
    pub const GUEST_NAME: &str = "guest_name";
    pub const TERMS_ACCEPTED: &str = "termsAccepted";
    pub const TERMS_ACCEPTED_DATE: &str = "termsAcceptedDate";
}

/// Durable string key/value storage that survives restarts
///
/// Reads are served from memory. Every mutation is appended to the log
/// before the in-memory map changes. A store built with `in_memory` has
/// no log and forgets everything on drop.
pub struct SessionStore {
    entries: DashMap<String, String>,
    wal: Option<Wal>,
}

impl SessionStore {
    /// Open (or create) a store at `path` and replay its log
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let wal = Wal::new(path)?;
        let entries = DashMap::new();

        let operations = wal.replay()?;
        for op in &operations {
            apply(&entries, op);
        }

        info!(
            path = %wal.path().display(),
            records_replayed = operations.len(),
            keys = entries.len(),
            "Session store opened"
        );

        Ok(Self {
            entries,
            wal: Some(wal),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            entries: DashMap::new(),
            wal: None,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        check_key(key)?;
        let op = WalOperation::Set {
            key: key.to_string(),
            value: value.to_string(),
        };
        self.log(&op)?;
        apply(&self.entries, &op);
        debug!(key = key, "Store key set");
        Ok(())
    }

    /// Returns the previous value if the key existed
    pub fn remove(&self, key: &str) -> Result<Option<String>, StoreError> {
        if !self.entries.contains_key(key) {
            return Ok(None);
        }
        self.log(&WalOperation::Remove {
            key: key.to_string(),
        })?;
        debug!(key = key, "Store key removed");
        Ok(self.entries.remove(key).map(|(_, value)| value))
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.log(&WalOperation::Clear)?;
        self.entries.clear();
        Ok(())
    }

    /// Rewrite the log so it holds one record per live key
    pub fn compact(&self) -> Result<(), StoreError> {
        let Some(wal) = &self.wal else {
            return Ok(());
        };

        let mut live: Vec<(String, String)> = self
            .entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        live.sort();

        let operations: Vec<WalOperation> = live
            .into_iter()
            .map(|(key, value)| WalOperation::Set { key, value })
            .collect();

        wal.rewrite(&operations)?;
        info!(keys = operations.len(), "Session store compacted");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn log(&self, op: &WalOperation) -> Result<(), StoreError> {
        match &self.wal {
            Some(wal) => wal.log_operation(op),
            None => Ok(()),
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn apply(entries: &DashMap<String, String>, op: &WalOperation) {
    match op {
        WalOperation::Set { key, value } => {
            entries.insert(key.clone(), value.clone());
        }
        WalOperation::Remove { key } => {
            entries.remove(key);
        }
        WalOperation::Clear => entries.clear(),
    }
}

fn check_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() || key.contains(['|', '\n', '\r']) {
        return Err(StoreError::InvalidRecord(format!("Invalid key: {:?}", key)));
    }
    Ok(())
}
