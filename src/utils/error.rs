use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl AppError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::IoError(e) => format!("Could not read a file: {}", e),
            AppError::TomlError(_) => "The configuration file is not valid TOML".to_string(),
            AppError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Failure reported by a country gateway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("server responded with status {status}")]
    Status { status: u16 },

    #[error("response body with status {status} could not be decoded: {message}")]
    Decode { status: u16, message: String },

    #[error("{message}")]
    Transport { message: String },
}

impl From<GatewayError> for SearchError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Status { status } | GatewayError::Decode { status, .. } => {
                SearchError::HttpError { status }
            }
            GatewayError::Transport { message } => SearchError::TransportError { cause: message },
        }
    }
}

/// Terminal outcome of a single search that did not end in a displayed summary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("no country name entered")]
    EmptyInput,

    #[error("no country matched the query")]
    NotFound,

    #[error("lookup failed with HTTP status {status}")]
    HttpError { status: u16 },

    #[error("lookup failed before a response arrived: {cause}")]
    TransportError { cause: String },
}

impl SearchError {
    /// Text written to the display surface for this outcome.
    pub fn display_text(&self) -> &'static str {
        match self {
            SearchError::EmptyInput => "Please enter a country name",
            SearchError::NotFound => "Country not found",
            SearchError::HttpError { .. } => "Error: Country not found",
            SearchError::TransportError { .. } => "Network error. Please check your connection.",
        }
    }

    /// Transient notification for this outcome, if any.
    pub fn notification(&self) -> Option<String> {
        match self {
            SearchError::EmptyInput | SearchError::NotFound => None,
            SearchError::HttpError { .. } => Some("Failed to fetch data".to_string()),
            SearchError::TransportError { cause } => Some(format!("Network error: {}", cause)),
        }
    }
}
