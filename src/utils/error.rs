use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Logging setup failed: {message}")]
    LoggingError { message: String },
}

/// Failure classes a pipeline stage can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Transform,
    Filesystem,
    Configuration,
    Unexpected,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) => ErrorCategory::Network,
            EtlError::SerializationError(_) | EtlError::ProcessingError { .. } => {
                ErrorCategory::Transform
            }
            EtlError::CsvError(_) | EtlError::IoError(_) => ErrorCategory::Filesystem,
            EtlError::ConfigValidationError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            EtlError::LoggingError { .. } => ErrorCategory::Unexpected,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::ApiError(_) => "Could not fetch data from the remote API".to_string(),
            EtlError::CsvError(_) => "Could not write the CSV output".to_string(),
            EtlError::IoError(e) => format!("File system operation failed: {}", e),
            EtlError::SerializationError(_) => "The API returned data in an unexpected format".to_string(),
            EtlError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            EtlError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            EtlError::ProcessingError { message } => format!("Data processing failed: {}", message),
            EtlError::LoggingError { message } => format!("Could not set up logging: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network connectivity and the source.endpoint setting",
            ErrorCategory::Transform => "Check that the API returns records with id, valor and data fields",
            ErrorCategory::Filesystem => "Check that the output and temp directories are writable",
            ErrorCategory::Configuration => "Fix the configuration file and restart",
            ErrorCategory::Unexpected => "Check the log file location and permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
