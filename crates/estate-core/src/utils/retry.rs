use crate::error::ApiError;
use backoff::{ExponentialBackoff, backoff::Backoff};
use std::future::Future;
use std::time::Duration;

/// Backoff schedule for listing and favorites reads. POSTs never retry.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts in total, the first one included
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::quick()
    }
}

impl RetryConfig {
    /// Short delays, two attempts; suits an interactive listing page
    pub fn quick() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(50),
            max_delay: Duration::from_secs(10),
            multiplier: 1.5,
        }
    }

    /// Single attempt
    pub fn none() -> Self {
        Self {
            max_retries: 1,
            ..Self::quick()
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }
}

/// Server errors, timeouts and dropped connections may succeed on a
/// second try; client errors and undecodable bodies will not.
pub fn is_transient(error: &ApiError) -> bool {
    matches!(
        error,
        ApiError::Http {
            status: 500..=599,
            ..
        } | ApiError::Timeout { .. }
            | ApiError::Network { .. }
    )
}

/// Drives a GET through up to `max_retries` attempts.
pub struct RetryExecutor {
    config: RetryConfig,
}

impl RetryExecutor {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    fn schedule(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: self.config.initial_delay,
            max_interval: self.config.max_delay,
            multiplier: self.config.multiplier,
            max_elapsed_time: None,
            ..Default::default()
        }
    }

    pub async fn execute<F, Fut, T>(&self, operation: F) -> Result<T, ApiError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut schedule = self.schedule();
        let attempts = self.config.max_retries.max(1);

        let mut attempt = 0;
        loop {
            attempt += 1;
            let error = match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            if attempt >= attempts || !is_transient(&error) {
                if attempt > 1 {
                    log::warn!("Giving up after {} attempts: {}", attempt, error);
                }
                return Err(error);
            }

            let Some(delay) = schedule.next_backoff() else {
                return Err(error);
            };
            log::debug!(
                "Attempt {}/{} failed ({}), retrying in {:?}",
                attempt,
                attempts,
                error,
                delay
            );
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_retry_success_immediate() {
        let executor = RetryExecutor::new(RetryConfig::default());

        let result = executor.execute(|| async { Ok::<i32, ApiError>(42) }).await;

        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_retry_recovers_after_server_error() {
        let executor = RetryExecutor::new(RetryConfig::quick().with_max_retries(3));
        let calls = Arc::new(AtomicU32::new(0));

        let result = executor
            .execute(|| {
                let calls = Arc::clone(&calls);
                async move {
                    if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(ApiError::Http {
                            status: 502,
                            endpoint: "/api/properties".to_string(),
                            message: "bad gateway".to_string(),
                        })
                    } else {
                        Ok("listing")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "listing");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_retry_gives_up_on_client_error() {
        let executor = RetryExecutor::new(RetryConfig::quick().with_max_retries(5));
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<(), ApiError> = executor
            .execute(|| {
                let calls = Arc::clone(&calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(ApiError::Http {
                        status: 404,
                        endpoint: "/api/properties/9".to_string(),
                        message: "missing".to_string(),
                    })
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_transient_errors() {
        let http = |status| ApiError::Http {
            status,
            endpoint: "/api/properties".to_string(),
            message: String::new(),
        };
        assert!(is_transient(&http(503)));
        assert!(!is_transient(&http(400)));
        assert!(is_transient(&ApiError::Timeout {
            timeout_secs: 1,
            endpoint: "/api/properties".to_string(),
        }));
    }

    #[test]
    fn test_retry_config_presets() {
        let quick = RetryConfig::quick();
        assert_eq!(quick.max_retries, 2);
        assert_eq!(quick.initial_delay, Duration::from_millis(50));

        assert_eq!(RetryConfig::none().max_retries, 1);
        assert_eq!(RetryConfig::quick().with_max_retries(0).max_retries, 1);
    }
}
