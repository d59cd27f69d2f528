use async_trait::async_trait;

use crate::Result;
use crate::api::client::ListingClient;
use crate::api::models::Property;
use crate::core::services::traits::FavoriteStore;

/// Favorites kept by the listings backend for one user.
///
/// The API has no delete endpoint, so [`FavoriteStore::remove`] only
/// records the removal in the log.
#[derive(Debug, Clone)]
pub struct HttpFavoriteStore {
    client: ListingClient,
    user_email: String,
}

impl HttpFavoriteStore {
    pub fn new(client: ListingClient, user_email: impl Into<String>) -> Self {
        Self {
            client,
            user_email: user_email.into(),
        }
    }

    pub fn user_email(&self) -> &str {
        &self.user_email
    }
}

#[async_trait]
impl FavoriteStore for HttpFavoriteStore {
    async fn add(&self, property_id: u32) -> Result<()> {
        self.client.add_favorite(property_id, &self.user_email).await
    }

    async fn remove(&self, property_id: u32) -> Result<()> {
        log::info!(
            "Favorite removal for property {} ({}) kept local: no delete endpoint",
            property_id,
            self.user_email
        );
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Property>> {
        self.client.list_favorites(&self.user_email).await
    }
}
