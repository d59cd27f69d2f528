//! Optimistic favorite indicators.
//!
//! A toggle flips the indicator and queues its notification at once; the
//! backend call happens afterwards and its failure is only logged. The
//! indicator is never rolled back, so it can disagree with the backend
//! after a failed save.

use std::collections::HashSet;
use std::time::Instant;

use crate::api::models::Property;
use crate::core::notify::NotificationQueue;
use crate::core::services::traits::FavoriteStore;

pub const ADDED_MESSAGE: &str = "Added to favorites!";
pub const REMOVED_MESSAGE: &str = "Removed from favorites";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteChange {
    Added(u32),
    Removed(u32),
}

impl FavoriteChange {
    pub fn property_id(&self) -> u32 {
        match self {
            FavoriteChange::Added(id) | FavoriteChange::Removed(id) => *id,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FavoriteChange::Added(_) => ADDED_MESSAGE,
            FavoriteChange::Removed(_) => REMOVED_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FavoriteToggles {
    marked: HashSet<u32>,
}

impl FavoriteToggles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed indicators from the backend's favorites list.
    pub fn from_properties<'a>(properties: impl IntoIterator<Item = &'a Property>) -> Self {
        Self {
            marked: properties.into_iter().map(|p| p.id).collect(),
        }
    }

    pub fn is_favorite(&self, property_id: u32) -> bool {
        self.marked.contains(&property_id)
    }

    pub fn len(&self) -> usize {
        self.marked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }

    /// Flip the indicator and queue the matching notification.
    pub fn toggle(
        &mut self,
        property_id: u32,
        notifications: &mut NotificationQueue,
        now: Instant,
    ) -> FavoriteChange {
        let change = if self.marked.remove(&property_id) {
            FavoriteChange::Removed(property_id)
        } else {
            self.marked.insert(property_id);
            FavoriteChange::Added(property_id)
        };
        notifications.success(change.message(), now);
        change
    }

    /// Toggle, then push the change to the store.
    pub async fn toggle_and_sync<S>(
        &mut self,
        property_id: u32,
        store: &S,
        notifications: &mut NotificationQueue,
        now: Instant,
    ) -> FavoriteChange
    where
        S: FavoriteStore + ?Sized,
    {
        let change = self.toggle(property_id, notifications, now);
        sync_change(store, change).await;
        change
    }
}

/// Send one change to the store. Failures are logged and otherwise ignored.
pub async fn sync_change<S>(store: &S, change: FavoriteChange)
where
    S: FavoriteStore + ?Sized,
{
    let result = match change {
        FavoriteChange::Added(id) => store.add(id).await,
        FavoriteChange::Removed(id) => store.remove(id).await,
    };
    if let Err(e) = result {
        log::warn!(
            "Failed to sync favorite for property {}: {}",
            change.property_id(),
            e
        );
    }
}
