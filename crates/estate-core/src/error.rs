use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("PropertyError: {0}")]
    Property(#[from] PropertyError),
    #[error("CalculatorError: {0}")]
    Calculator(#[from] CalculatorError),
    #[error("UtilsError: {0}")]
    Utils(#[from] UtilsError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Unknown command: {command}")]
    UnknownCommand { command: String },
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64, endpoint: String },
    #[error("HTTP error: {status} {message}")]
    Http {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("Connection failed: {message}")]
    Network { endpoint: String, message: String },
    #[error("Invalid response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

#[derive(Error, Debug)]
pub enum PropertyError {
    #[error("Property {id} not found")]
    NotFound { id: u32 },
    #[error("Favorite could not be saved for property {property_id}: {reason}")]
    FavoriteFailed { property_id: u32, reason: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    #[error("Please fill in all calculator fields")]
    MissingInput { field: String },
    #[error("Invalid value for {field}: {reason}")]
    OutOfRange { field: String, reason: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value for '{field}': {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum UtilsError {
    #[error("Validation error: {message}")]
    Validation { message: String },
    #[error("Render error: {message}")]
    Render { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::Network { .. } => ErrorSeverity::High,
                ApiError::Timeout { .. } => ErrorSeverity::Medium,
                ApiError::Http { status, .. } if *status >= 500 => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Property(_) => ErrorSeverity::Medium,
            AppError::Calculator(_) => ErrorSeverity::Low,
            AppError::Utils(_) => ErrorSeverity::Low,
        }
    }

    /// Short message suitable for showing in place of results.
    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Property(PropertyError::NotFound { id }) => {
                format!("Property {} not found", id)
            }
            AppError::Api(ApiError::Network { .. }) => {
                "Could not reach the listings server".to_string()
            }
            AppError::Api(ApiError::Timeout { timeout_secs, .. }) => {
                format!("The listings server did not answer within {}s", timeout_secs)
            }
            AppError::Api(ApiError::Http { status, .. }) => {
                format!("The listings server answered with status {}", status)
            }
            AppError::Calculator(e) => e.to_string(),
            AppError::Utils(UtilsError::Validation { message }) => message.clone(),
            _ => format!("{}", self),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Api(ApiError::Network { .. } | ApiError::Timeout { .. }) => Some(
                "Check the API URL with 'estate config show' or set ESTATE_API_URL".to_string(),
            ),
            AppError::Property(PropertyError::NotFound { .. }) => {
                Some("'estate list' to browse available properties".to_string())
            }
            AppError::Config(ConfigError::InvalidValue { field, .. }) => Some(format!(
                "'estate config show' to see the current {}",
                field
            )),
            _ => None,
        }
    }
}
