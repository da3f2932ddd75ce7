use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatusError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Pattern error: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Render error ({target}): {message}")]
    RenderError { target: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Storage,
    Rendering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl StatusError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StatusError::ConfigValidationError { .. }
            | StatusError::InvalidConfigValueError { .. }
            | StatusError::MissingConfigError { .. }
            | StatusError::PatternError(_) => ErrorCategory::Configuration,
            StatusError::IoError(_) => ErrorCategory::Storage,
            StatusError::SerializationError(_) | StatusError::RenderError { .. } => {
                ErrorCategory::Rendering
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 配置錯誤無法在運行中恢復
            ErrorCategory::Configuration => ErrorSeverity::Critical,
            ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Rendering => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            StatusError::ConfigValidationError { .. } => {
                "Check the TOML syntax and the [store] / [refresh] / [render] tables"
            }
            StatusError::InvalidConfigValueError { .. } => {
                "Opening hours must satisfy 0 <= open_hour < close_hour <= 24"
            }
            StatusError::MissingConfigError { .. } => "Add the missing field to the configuration",
            StatusError::PatternError(_) => "Element ids must be plain HTML ids",
            StatusError::IoError(_) => "Make sure the output path exists and is writable",
            StatusError::SerializationError(_) => "Report this as a bug",
            StatusError::RenderError { .. } => "Check that the page is valid UTF-8 HTML",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid store configuration: {}", self),
            ErrorCategory::Storage => format!("Could not read or write a file: {}", self),
            ErrorCategory::Rendering => format!("Could not publish the store status: {}", self),
        }
    }

    /// 依嚴重程度決定程序退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, StatusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_critical() {
        let err = StatusError::InvalidConfigValueError {
            field: "store.open_hour".to_string(),
            value: "23".to_string(),
            reason: "must be before close_hour".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
        assert!(err.user_friendly_message().contains("store.open_hour"));
    }

    #[test]
    fn test_render_errors_are_retryable() {
        let err = StatusError::RenderError {
            target: "index.html".to_string(),
            message: "not utf-8".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.exit_code(), 2);
    }
}
