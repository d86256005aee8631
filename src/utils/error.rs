use thiserror::Error;

/// Errors raised by a store adapter. The merger wraps them into
/// [`BreachError::StoreRead`] / [`BreachError::StoreWrite`].
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("malformed item: {0}")]
    MalformedItem(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum BreachError {
    #[error("not a valid email address: {email}")]
    InvalidEmail { email: String },

    #[error("failed to read account {account}: {source}")]
    StoreRead {
        account: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to write account {account}: {source}")]
    StoreWrite {
        account: String,
        #[source]
        source: StoreError,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Storage,
    Internal,
    Configuration,
}

impl BreachError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BreachError::InvalidEmail { .. } => ErrorCategory::Input,
            BreachError::StoreRead { .. } | BreachError::StoreWrite { .. } => {
                ErrorCategory::Storage
            }
            BreachError::Serialization(_) | BreachError::Io(_) => ErrorCategory::Internal,
            BreachError::Config { .. }
            | BreachError::InvalidConfigValue { .. }
            | BreachError::MissingConfig { .. } => ErrorCategory::Configuration,
        }
    }

    /// HTTP status used when the error is returned through the request handler.
    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Input => 400,
            _ => 500,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BreachError::InvalidEmail { email } => format!("Invalid email: {}", email),
            BreachError::StoreRead { account, .. } => {
                format!("Could not load the existing breaches for {}", account)
            }
            BreachError::StoreWrite { account, .. } => {
                format!("Could not save the breaches for {}", account)
            }
            BreachError::Serialization(_) => "Failed to build the response".to_string(),
            BreachError::Io(e) => format!("File access failed: {}", e),
            BreachError::Config { message } => format!("Configuration problem: {}", message),
            BreachError::InvalidConfigValue { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            BreachError::MissingConfig { field } => {
                format!("Missing required setting '{}'", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Fix the listed email address and resubmit the whole batch",
            ErrorCategory::Storage => {
                "Check store connectivity; accounts before the failing one are already saved, \
                 so the batch can be resubmitted safely"
            }
            ErrorCategory::Internal => "Report this as a bug",
            ErrorCategory::Configuration => {
                "Check the configuration file, flags and environment variables"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BreachError>;
