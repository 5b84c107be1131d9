//! In-memory driver roster.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{DomainError, DriverProfile, DriverUpdate};

/// Errors from roster operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RosterError {
    #[error("driver {0} is already registered")]
    AlreadyRegistered(String),

    #[error("driver {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// Thread-safe driver profiles keyed by name.
#[derive(Clone, Default)]
pub struct DriverRoster {
    inner: Arc<RwLock<HashMap<String, DriverProfile>>>,
}

impl DriverRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new driver; names are unique.
    pub async fn register(&self, profile: DriverProfile) -> Result<(), RosterError> {
        let mut guard = self.inner.write().await;
        if guard.contains_key(&profile.name) {
            return Err(RosterError::AlreadyRegistered(profile.name));
        }
        guard.insert(profile.name.clone(), profile);
        Ok(())
    }

    pub async fn get(&self, name: &str) -> Option<DriverProfile> {
        let guard = self.inner.read().await;
        guard.get(name).cloned()
    }

    /// Apply a validated partial update and return the new profile.
    pub async fn update(
        &self,
        name: &str,
        update: &DriverUpdate,
    ) -> Result<DriverProfile, RosterError> {
        let mut guard = self.inner.write().await;
        let profile = guard
            .get_mut(name)
            .ok_or_else(|| RosterError::NotFound(name.to_string()))?;
        update.apply_to(profile)?;
        Ok(profile.clone())
    }

    /// Drivers currently offering rides, ordered by name.
    pub async fn enabled(&self) -> Vec<DriverProfile> {
        let guard = self.inner.read().await;
        let mut drivers: Vec<DriverProfile> =
            guard.values().filter(|d| d.enabled).cloned().collect();
        drivers.sort_by(|a, b| a.name.cmp(&b.name));
        drivers
    }

    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.is_empty()
    }
}
