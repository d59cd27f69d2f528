//! Checks for user-supplied settings before they are saved or used
//! to build a client.

use crate::error::UtilsError;

fn invalid(message: String) -> crate::error::AppError {
    UtilsError::Validation { message }.into()
}

/// The listings API base URL must be an absolute http(s) URL with a host.
pub fn validate_url(raw: &str) -> crate::Result<()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(invalid("API URL cannot be empty".to_string()));
    }

    let parsed =
        url::Url::parse(raw).map_err(|e| invalid(format!("Invalid API URL '{}': {}", raw, e)))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(invalid(format!(
                "Invalid API URL '{}': unsupported scheme '{}', use http or https",
                raw, scheme
            )));
        }
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid(format!("Invalid API URL '{}': missing host", raw)));
    }

    Ok(())
}

/// Favorites are keyed by email, so only the overall shape is checked:
/// one `@`, a non-empty local part and a dotted domain.
pub fn validate_email(email: &str) -> crate::Result<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(invalid("Email cannot be empty".to_string()));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(invalid(format!("Invalid email '{}': missing '@'", email)));
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid(format!(
            "Invalid email '{}': expected name@domain",
            email
        )));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid(format!(
            "Invalid email '{}': domain '{}' is not valid",
            email, domain
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("http://localhost:5000").is_ok());
        assert!(validate_url("https://listings.example.com/").is_ok());

        for bad in ["", "localhost:5000", "ftp://example.com", "http://"] {
            assert!(validate_url(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("buyer.one@homes.org").is_ok());

        for bad in [
            "",
            "invalid",
            "@domain.com",
            "user@",
            "user@domain",
            "user@domain@com",
            "user@.com",
        ] {
            assert!(validate_email(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_errors_are_validation_errors() {
        let err = validate_email("nope").unwrap_err();
        assert!(matches!(err, AppError::Utils(UtilsError::Validation { .. })));
        assert_eq!(
            err.to_string(),
            "UtilsError: Validation error: Invalid email 'nope': missing '@'"
        );
    }
}
