use crate::api::models::{ApiMessage, FavoriteRequest, ListingResponse, Property, PropertyPage};
use crate::error::{ApiError, AppError, PropertyError};
use crate::utils::error_helpers::*;
use crate::utils::retry::{RetryConfig, RetryExecutor};
use reqwest::{Client, Method, RequestBuilder, Response};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("estate/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ListingClient {
    client: Client,
    pub base_url: String,
    timeout_secs: u64,
    retry: RetryConfig,
}

impl ListingClient {
    // Create baseClient with default settings
    pub fn new(base_url: String) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: String, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| convert_request_error(e, "client_init", timeout_secs))?;

        Ok(ListingClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
            retry: RetryConfig::default(),
        })
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<Response, ApiError> {
        request
            .send()
            .await
            .map_err(|e| convert_request_error(e, endpoint, self.timeout_secs))
    }

    /// GET with retry on server errors and timeouts.
    async fn get_json<T>(&self, endpoint: &str) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let executor = RetryExecutor::new(self.retry.clone());
        let client = self;
        executor
            .execute(move || async move {
                let response = client
                    .send(client.build_request(Method::GET, endpoint), endpoint)
                    .await?;
                client.handle_response(response, endpoint).await
            })
            .await
    }

    /// List properties. `query` is an already-serialized query string
    /// (without the leading `?`), usually from `ListingQuery::api_query`.
    pub async fn get_properties(&self, query: &str) -> Result<PropertyPage, AppError> {
        let query = query.trim_start_matches('?');
        let endpoint = if query.is_empty() {
            "/api/properties".to_string()
        } else {
            format!("/api/properties?{}", query)
        };

        log::debug!("Fetching listing page: {}", endpoint);
        let response: ListingResponse = self.get_json(&endpoint).await?;
        Ok(response.into())
    }

    /// Fetch a single property. Any non-2xx answer is reported as
    /// [`PropertyError::NotFound`]; transport failures stay API errors.
    pub async fn get_property(&self, id: u32) -> Result<Property, AppError> {
        let endpoint = format!("/api/properties/{}", id);

        match self.get_json::<Property>(&endpoint).await {
            Ok(property) => Ok(property),
            Err(ApiError::Http { status, message, .. }) => {
                log::debug!("Property {} lookup failed with {}: {}", id, status, message);
                Err(AppError::Property(PropertyError::NotFound { id }))
            }
            Err(e) => Err(AppError::Api(e)),
        }
    }

    /// Save a favorite. Not retried: POST is not idempotent on this API
    /// (a duplicate answers 400).
    pub async fn add_favorite(&self, property_id: u32, user_email: &str) -> Result<(), AppError> {
        let endpoint = "/api/favorites";
        let body = FavoriteRequest {
            property_id,
            user_email: user_email.to_string(),
        };

        let response = self
            .send(self.build_request(Method::POST, endpoint).json(&body), endpoint)
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(AppError::Api(
                self.error_from_response(response, endpoint).await,
            ))
        }
    }

    /// Properties the user marked as favorite.
    pub async fn list_favorites(&self, user_email: &str) -> Result<Vec<Property>, AppError> {
        let endpoint = format!("/api/favorites/{}", encode_path_segment(user_email));
        Ok(self.get_json(&endpoint).await?)
    }

    pub async fn handle_response<T>(&self, response: Response, endpoint: &str) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        if response.status().is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| convert_json_error(e, endpoint))
        } else {
            Err(self.error_from_response(response, endpoint).await)
        }
    }

    async fn error_from_response(&self, response: Response, endpoint: &str) -> ApiError {
        let status = response.status().as_u16();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        // Prefer the backend's {"error": "..."} envelope when present
        let message = serde_json::from_str::<ApiMessage>(&error_text)
            .ok()
            .and_then(|m| m.error.or(m.message))
            .unwrap_or(error_text);

        match status {
            408 | 504 => ApiError::Timeout {
                timeout_secs: self.timeout_secs,
                endpoint: endpoint.to_string(),
            },
            _ => ApiError::Http {
                status,
                endpoint: endpoint.to_string(),
                message,
            },
        }
    }
}

fn encode_path_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
