use thiserror::Error;

/// Service-level errors that can occur in business logic
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Repository error: {source}")]
    Repository {
        #[from]
        source: RepositoryError,
    },

    #[error("Recipe not available: {recipe_id}")]
    RecipeUnavailable { recipe_id: String },

    #[error("Failed to open {url}: {message}")]
    OpenFailed { url: String, message: String },
}

/// Errors raised while talking to the menu backend or the recipe service
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("HTTP request failed: {source}")]
    Request {
        #[from]
        source: reqwest::Error,
    },

    #[error("Request timed out: {url}")]
    Timeout { url: String },

    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("Invalid URL: {message}")]
    InvalidUrl { message: String },

    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },
}

impl RepositoryError {
    /// Classify a reqwest failure, keeping timeouts distinct
    pub fn from_reqwest(err: reqwest::Error, url: &str) -> Self {
        if err.is_timeout() {
            RepositoryError::Timeout {
                url: url.to_string(),
            }
        } else if err.is_connect() {
            RepositoryError::ConnectionFailed {
                message: err.to_string(),
            }
        } else {
            RepositoryError::Request { source: err }
        }
    }
}

/// Validation errors for input data
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredField { field: String },

    #[error("Invalid field value: {field}={value}, reason={reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Field too long: {field}, max_length={max_length}, actual_length={actual_length}")]
    TooLong {
        field: String,
        max_length: usize,
        actual_length: usize,
    },

    #[error("Value out of range: {field}, min={min}, max={max}, value={value}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
        value: String,
    },

    #[error("Feedback is empty: provide a comment or a rating")]
    EmptyFeedback,
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::ValidationError {
            message: err.to_string(),
        }
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Result type alias for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;
