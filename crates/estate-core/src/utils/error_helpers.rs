//! Mapping of reqwest failures onto [`ApiError`], tagged with the endpoint
//! that was being called.

use crate::error::ApiError;

pub fn convert_request_error(error: reqwest::Error, endpoint: &str, timeout_secs: u64) -> ApiError {
    let endpoint = endpoint.to_string();

    if error.is_timeout() {
        return convert_timeout_error(&endpoint, timeout_secs);
    }

    match error.status() {
        Some(status) => ApiError::Http {
            status: status.as_u16(),
            endpoint,
            message: error.to_string(),
        },
        None => {
            let message = if error.is_connect() {
                format!("server unreachable ({})", error)
            } else {
                error.to_string()
            };
            ApiError::Network { endpoint, message }
        }
    }
}

pub fn convert_timeout_error(endpoint: &str, timeout_secs: u64) -> ApiError {
    ApiError::Timeout {
        timeout_secs,
        endpoint: endpoint.to_string(),
    }
}

/// A 2xx body that is not the JSON shape the endpoint promises.
pub fn convert_json_error(error: reqwest::Error, endpoint: &str) -> ApiError {
    ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: format!("unexpected response body: {}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_keeps_endpoint() {
        let err = convert_timeout_error("/api/properties", 30);
        assert!(matches!(
            &err,
            ApiError::Timeout { timeout_secs: 30, endpoint } if endpoint == "/api/properties"
        ));
        assert_eq!(err.to_string(), "Request timed out after 30s");
    }
}
