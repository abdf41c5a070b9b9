use std::error::Error as StdError;
use std::fmt;
use serde::{Deserialize, Serialize};
use crate::enums::ai_provider_error::AiProviderError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AuditError {
    // Configuration errors
    ConfigurationError {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },
    ConfigurationFileError {
        path: String,
        reason: String,
    },

    // Analyzer errors
    ToolInvocationFailed {
        stderr: String,
    },
    OutputMissing {
        path: String,
    },

    // Completion API errors
    ApiCallFailed {
        reason: String,
    },

    // Request errors
    InvalidRequest {
        reason: String,
    },

    // File operation errors
    FileOperationError {
        file_path: String,
        operation: String,
        reason: String,
    },

    // Parser errors
    ParseError {
        content_type: String,
        reason: String,
    },

    // System errors
    SystemError {
        operation: String,
        reason: String,
    },
}

impl AuditError {
    pub fn config_error(message: &str, field: Option<&str>, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            field: field.map(|s| s.to_string()),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn config_file_error(path: &str, reason: &str) -> Self {
        Self::ConfigurationFileError {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn tool_failed(stderr: &str) -> Self {
        Self::ToolInvocationFailed {
            stderr: stderr.to_string(),
        }
    }

    pub fn output_missing(path: &str) -> Self {
        Self::OutputMissing {
            path: path.to_string(),
        }
    }

    pub fn api_failed(reason: &str) -> Self {
        Self::ApiCallFailed {
            reason: reason.to_string(),
        }
    }

    pub fn invalid_request(reason: &str) -> Self {
        Self::InvalidRequest {
            reason: reason.to_string(),
        }
    }

    pub fn file_error(file_path: &str, operation: &str, reason: &str) -> Self {
        Self::FileOperationError {
            file_path: file_path.to_string(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn system_error(operation: &str, reason: &str) -> Self {
        Self::SystemError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SystemError { .. } => ErrorSeverity::Critical,
            Self::ToolInvocationFailed { .. } => ErrorSeverity::High,
            Self::OutputMissing { .. } => ErrorSeverity::High,
            Self::ConfigurationFileError { .. } => ErrorSeverity::High,
            Self::FileOperationError { .. } => ErrorSeverity::High,
            Self::ApiCallFailed { .. } => ErrorSeverity::Medium,
            Self::ParseError { .. } => ErrorSeverity::Medium,
            Self::ConfigurationError { .. } => ErrorSeverity::Low,
            Self::InvalidRequest { .. } => ErrorSeverity::Low,
        }
    }

    /// Process exit code for the CLI entry point.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigurationError { .. }
            | Self::ConfigurationFileError { .. }
            | Self::InvalidRequest { .. } => 2,
            Self::ToolInvocationFailed { .. } => 3,
            Self::OutputMissing { .. } => 4,
            Self::ApiCallFailed { .. } => 5,
            _ => 1,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationError { message, field, suggestion } => {
                let mut msg = format!("Configuration Error: {}", message);
                if let Some(field) = field {
                    msg.push_str(&format!(" (field: {})", field));
                }
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::ConfigurationFileError { path, reason } => {
                format!("Configuration file error at '{}': {}\n💡 Check file permissions and syntax", path, reason)
            }
            Self::ToolInvocationFailed { stderr } => {
                format!("❌ Slither failed: {}", stderr)
            }
            Self::OutputMissing { path } => {
                format!("❌ Slither JSON output file was not generated ({})", path)
            }
            Self::ApiCallFailed { reason } => {
                format!("Error fetching AI explanation: {}", reason)
            }
            Self::InvalidRequest { reason } => reason.clone(),
            Self::FileOperationError { file_path, operation, reason } => {
                format!("File operation '{}' failed for '{}': {}\n💡 Check file permissions and path", operation, file_path, reason)
            }
            Self::ParseError { content_type, reason } => {
                format!("Parse error in {}: {}\n💡 Check the format and syntax of the input", content_type, reason)
            }
            Self::SystemError { operation, reason } => {
                format!("System error during {}: {}", operation, reason)
            }
        }
    }

    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl StdError for AuditError {}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Result type alias for solaudit operations
pub type AuditResult<T> = Result<T, AuditError>;

/// Error handler for consistent error processing
pub struct ErrorHandler;

impl ErrorHandler {
    /// Handle error with appropriate logging and user feedback
    pub fn handle_error(error: &AuditError) {
        let severity = error.severity();

        log::error!("[{}] {}", severity.name(), error.technical_details());
        eprintln!("{} {}", severity.emoji(), error.user_message());
    }
}

impl From<std::io::Error> for AuditError {
    fn from(error: std::io::Error) -> Self {
        AuditError::SystemError {
            operation: "I/O operation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for AuditError {
    fn from(error: serde_json::Error) -> Self {
        AuditError::ParseError {
            content_type: "JSON".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for AuditError {
    fn from(error: toml::de::Error) -> Self {
        AuditError::ParseError {
            content_type: "TOML".to_string(),
            reason: error.message().to_string(),
        }
    }
}

impl From<reqwest::Error> for AuditError {
    fn from(error: reqwest::Error) -> Self {
        AuditError::ApiCallFailed {
            reason: error.to_string(),
        }
    }
}

impl From<AiProviderError> for AuditError {
    fn from(error: AiProviderError) -> Self {
        AuditError::ApiCallFailed {
            reason: error.to_string(),
        }
    }
}
