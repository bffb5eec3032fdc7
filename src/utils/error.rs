use crate::core::validator::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Calculation engine error: {message}")]
    EngineError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Configuration,
    Engine,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Transient, worth retrying
    Medium,
    /// The request itself was rejected
    High,
    /// The tool cannot run as configured
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl CalcError {
    pub fn engine(message: impl Into<String>) -> Self {
        CalcError::EngineError {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        CalcError::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CalcError::ValidationError(_) => ErrorCategory::Input,
            CalcError::ApiError(_) => ErrorCategory::Network,
            CalcError::ConfigError { .. }
            | CalcError::InvalidConfigValueError { .. }
            | CalcError::MissingConfigError { .. } => ErrorCategory::Configuration,
            CalcError::EngineError { .. } => ErrorCategory::Engine,
            CalcError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Network | ErrorCategory::Engine => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Short message suitable for showing to whoever typed the numbers.
    pub fn user_friendly_message(&self) -> String {
        match self {
            CalcError::ValidationError(errors) => errors.messages().join("; "),
            CalcError::ApiError(e) if e.is_timeout() => {
                "The calculation service took too long to respond.".to_string()
            }
            CalcError::ApiError(e) if e.is_connect() => {
                "Could not reach the calculation service.".to_string()
            }
            CalcError::ApiError(e) => match e.status() {
                Some(status) => format!("The calculation service returned an error ({}).", status),
                None => "Failed to calculate interest. Please try again.".to_string(),
            },
            CalcError::EngineError { message } => {
                format!("Failed to calculate interest: {}", message)
            }
            CalcError::ConfigError { .. }
            | CalcError::InvalidConfigValueError { .. }
            | CalcError::MissingConfigError { .. } => format!("Configuration problem: {}", self),
            CalcError::IoError(_) => format!("Unexpected internal error: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Enter a principal and time greater than 0 and a rate between 0 and 100",
            ErrorCategory::Network => "Check the sheets endpoint and your network connection, then retry",
            ErrorCategory::Configuration => "Review the config file and environment variables",
            ErrorCategory::Engine => {
                "Make sure the spreadsheet has Input, Calc and Output sheets and is shared with the service account"
            }
            ErrorCategory::System => "Retry with --verbose and inspect the log output",
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_critical() {
        let err = CalcError::MissingConfigError {
            field: "sheets.spreadsheet_id".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.severity().exit_code(), 3);
    }

    #[test]
    fn test_engine_error_message() {
        let err = CalcError::engine("Worksheet 'Output' not found");
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(
            err.user_friendly_message(),
            "Failed to calculate interest: Worksheet 'Output' not found"
        );
    }

    #[test]
    fn test_io_errors_are_system_failures() {
        let err: CalcError = std::io::Error::new(std::io::ErrorKind::NotFound, "calc.toml").into();
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity().exit_code(), 3);
        assert!(err.user_friendly_message().starts_with("Unexpected internal error"));
    }
}
