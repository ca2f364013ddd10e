use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Unknown unit: {unit}")]
    UnknownUnit { unit: String },

    #[error("Cannot convert between '{from}' and '{to}'")]
    IncompatibleUnits { from: String, to: String },

    #[error("Unknown currency code: {code}")]
    UnknownCurrency { code: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Data,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CalcError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CalcError::ApiError(_) => ErrorCategory::Network,
            CalcError::IoError(_) | CalcError::ZipError(_) => ErrorCategory::Storage,
            CalcError::CsvError(_) | CalcError::SerializationError(_) => ErrorCategory::Data,
            CalcError::ConfigError { .. }
            | CalcError::ConfigValidationError { .. }
            | CalcError::InvalidConfigValueError { .. }
            | CalcError::MissingConfigError { .. } => ErrorCategory::Configuration,
            CalcError::UnknownUnit { .. }
            | CalcError::IncompatibleUnits { .. }
            | CalcError::UnknownCurrency { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 匯率抓取失敗時有預設值可用
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            CalcError::ApiError(_) => "Could not reach the exchange-rate service".to_string(),
            CalcError::IoError(e) => format!("File system error: {}", e),
            CalcError::ZipError(_) => "Failed to build the export bundle".to_string(),
            CalcError::CsvError(_) | CalcError::SerializationError(_) => {
                "Failed to serialize the calculation result".to_string()
            }
            CalcError::ConfigError { message } => format!("Configuration problem: {}", message),
            CalcError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            CalcError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            CalcError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
            CalcError::UnknownUnit { unit } => format!("'{}' is not a supported unit", unit),
            CalcError::IncompatibleUnits { from, to } => {
                format!("'{}' and '{}' measure different things", from, to)
            }
            CalcError::UnknownCurrency { code } => {
                format!("'{}' is not in the exchange-rate table", code)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection or the [rates] endpoint",
            ErrorCategory::Storage => "Check that the export directory exists and is writable",
            ErrorCategory::Data => "Re-run with --verbose and report the failing input",
            ErrorCategory::Configuration => "Fix the configuration file and try again",
            ErrorCategory::Input => "Run the command with --help to list supported values",
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
