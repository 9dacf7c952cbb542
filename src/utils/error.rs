use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("reading {file}: {reason}")]
    CredentialError { file: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Error reading input file {path}: {reason}")]
    InputError { path: String, reason: String },

    #[error("Error writing output file {path}: {reason}")]
    OutputError { path: String, reason: String },

    #[error("Unexpected response: {message}")]
    ResponseError { message: String },
}

/// 錯誤分類，對應批次流程中的四個階段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Remote,
    Output,
}

impl CheckError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CheckError::CredentialError { .. }
            | CheckError::ConfigError { .. }
            | CheckError::InvalidConfigValueError { .. }
            | CheckError::TomlError(_) => ErrorCategory::Configuration,
            CheckError::InputError { .. } => ErrorCategory::Input,
            CheckError::ApiError(_)
            | CheckError::SerializationError(_)
            | CheckError::ResponseError { .. } => ErrorCategory::Remote,
            CheckError::OutputError { .. } => ErrorCategory::Output,
        }
    }

    /// 除了逐筆查詢失敗以外，其餘錯誤都會中止整個批次
    pub fn is_fatal(&self) -> bool {
        self.category() != ErrorCategory::Remote
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CheckError::CredentialError { .. }
            | CheckError::ConfigError { .. }
            | CheckError::InvalidConfigValueError { .. }
            | CheckError::TomlError(_) => format!("[CONFIG ERROR] {}", self),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Put the server URL in credentials.txt and the API password in pwd.txt (first line of each)"
            }
            ErrorCategory::Input => "Check that the input file exists and is readable",
            ErrorCategory::Remote => "Check that the relay server is reachable and the password is correct",
            ErrorCategory::Output => "Check that the output directory exists and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckError>;
