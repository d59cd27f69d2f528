//! Seams between the controller logic and the listings backend.

use async_trait::async_trait;

use crate::Result;
use crate::api::client::ListingClient;
use crate::api::models::{Property, PropertyPage};

/// Read side of the listings backend.
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// One page of results for a serialized query (`ListingQuery::api_query`).
    async fn fetch_page(&self, api_query: &str) -> Result<PropertyPage>;

    async fn fetch_property(&self, id: u32) -> Result<Property>;
}

/// Persistence of a user's favorites.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    async fn add(&self, property_id: u32) -> Result<()>;

    async fn remove(&self, property_id: u32) -> Result<()>;

    async fn list(&self) -> Result<Vec<Property>>;
}

#[async_trait]
impl PropertySource for ListingClient {
    async fn fetch_page(&self, api_query: &str) -> Result<PropertyPage> {
        self.get_properties(api_query).await
    }

    async fn fetch_property(&self, id: u32) -> Result<Property> {
        self.get_property(id).await
    }
}
