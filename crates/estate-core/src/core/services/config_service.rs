//! Configuration service: resolved settings and the clients built from them

use crate::AppError;
use crate::api::client::ListingClient;
use crate::core::services::favorite_store::HttpFavoriteStore;
use crate::error::ConfigError;
use crate::storage::config::Config;
use crate::utils::retry::RetryConfig;
use crate::utils::validation::{validate_email, validate_url};
use std::path::PathBuf;

pub struct ConfigService {
    config: Config,
    url_override: Option<String>,
}

impl ConfigService {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            url_override: None,
        }
    }

    /// Command-line `--api-url`; wins over environment and file.
    pub fn with_url_override(mut self, url: Option<String>) -> Self {
        self.url_override = url.filter(|u| !u.trim().is_empty());
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn api_url(&self) -> String {
        self.url_override
            .clone()
            .unwrap_or_else(|| self.config.get_api_url())
    }

    pub fn user_email(&self) -> String {
        self.config.get_user_email()
    }

    /// Validated update of the stored API URL.
    pub fn set_api_url(&mut self, url: String) -> Result<(), AppError> {
        validate_url(&url)?;
        self.config.set_api_url(url.trim_end_matches('/').to_string());
        Ok(())
    }

    /// Validated update of the stored user email.
    pub fn set_user_email(&mut self, email: String) -> Result<(), AppError> {
        validate_email(&email)?;
        self.config.set_user_email(email);
        Ok(())
    }

    pub fn set_timeout(&mut self, seconds: u64) -> Result<(), AppError> {
        if seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_seconds".to_string(),
                value: seconds.to_string(),
                reason: "must be at least 1 second".to_string(),
            }
            .into());
        }
        self.config.timeout_seconds = Some(seconds);
        Ok(())
    }

    pub fn set_max_retries(&mut self, attempts: u32) -> Result<(), AppError> {
        if attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_retries".to_string(),
                value: attempts.to_string(),
                reason: "must be at least 1 attempt".to_string(),
            }
            .into());
        }
        self.config.max_retries = Some(attempts);
        Ok(())
    }

    pub fn save_config(&self, path: Option<PathBuf>) -> Result<(), AppError> {
        self.config.save(path).map_err(|e| e.into())
    }

    pub fn listing_client(&self) -> Result<ListingClient, AppError> {
        let url = self.api_url();
        validate_url(&url)?;
        let retry = RetryConfig::default().with_max_retries(self.config.max_retries());
        Ok(ListingClient::with_timeout(url, self.config.timeout_seconds())?.with_retry(retry))
    }

    pub fn favorite_store(&self) -> Result<HttpFavoriteStore, AppError> {
        Ok(HttpFavoriteStore::new(
            self.listing_client()?,
            self.user_email(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_override_wins() {
        let config = Config {
            api_url: Some("http://file.test".to_string()),
            ..Default::default()
        };
        let service = ConfigService::new(config)
            .with_url_override(Some("http://flag.test".to_string()));
        assert_eq!(service.api_url(), "http://flag.test");

        let client = service.listing_client().expect("client");
        assert_eq!(client.base_url, "http://flag.test");
    }

    #[test]
    fn test_setters_validate() {
        let mut service = ConfigService::new(Config::default());

        assert!(service.set_api_url("ftp://nope".to_string()).is_err());
        assert!(service.set_user_email("not-an-email".to_string()).is_err());

        service
            .set_api_url("https://listings.example.test/".to_string())
            .expect("valid url");
        service
            .set_user_email("buyer@example.test".to_string())
            .expect("valid email");
        assert_eq!(
            service.config().api_url.as_deref(),
            Some("https://listings.example.test")
        );
        assert_eq!(
            service.config().user_email.as_deref(),
            Some("buyer@example.test")
        );

        assert!(service.set_timeout(0).is_err());
        assert!(service.set_max_retries(0).is_err());
        service.set_timeout(12).expect("valid timeout");
        assert_eq!(service.config().timeout_seconds(), 12);
    }
}
