//! Group name lookup.
//!
//! The full group list is fetched once at startup and is read-only
//! afterwards, so it is shared behind a plain `Arc`.

use std::sync::Arc;

use crate::domain::{Group, GroupId};
use crate::untis::{TimetableProvider, UntisError};

/// Group name → id directory.
#[derive(Debug, Clone, Default)]
pub struct GroupDirectory {
    groups: Arc<Vec<Group>>,
}

impl GroupDirectory {
    /// Create a directory from an already-loaded group list.
    pub fn new(groups: Vec<Group>) -> Self {
        Self {
            groups: Arc::new(groups),
        }
    }

    /// Load the directory from the provider.
    ///
    /// This will fail if the provider is unreachable.
    pub async fn fetch<P: TimetableProvider>(provider: &P) -> Result<Self, UntisError> {
        let groups = provider.fetch_groups().await?;
        Ok(Self::new(groups))
    }

    /// Look up a group id by its exact display name.
    ///
    /// `None` means the caller supplied an unknown group.
    pub fn resolve(&self, name: &str) -> Option<GroupId> {
        self.groups.iter().find(|g| g.name == name).map(|g| g.id)
    }

    /// All groups, in provider order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
