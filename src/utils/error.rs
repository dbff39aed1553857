use serde_json::Value;
use thiserror::Error;

/// Why a phone number was rejected by the codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneFormatError {
    #[error("Phone number must be exactly 10 digits, got {actual}")]
    WrongLength { actual: usize },

    #[error("Phone number must contain only digits, found {found:?} at position {index}")]
    NonDigit { index: usize, found: String },
}

/// A field-addressed failure raised by the CV schema validator.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message} (field: {field})")]
pub struct CvValidationError {
    pub message: String,
    pub field: String,
    pub value: Value,
}

impl CvValidationError {
    pub fn new(message: impl Into<String>, field: impl Into<String>, value: Value) -> Self {
        Self {
            message: message.into(),
            field: field.into(),
            value,
        }
    }
}

#[derive(Error, Debug)]
pub enum CvError {
    #[error("Invalid phone format: {0}")]
    InvalidPhoneFormat(#[from] PhoneFormatError),

    #[error("CV validation failed: {0}")]
    Validation(#[from] CvValidationError),

    #[error("Invalid date {value:?}: expected YYYY-MM")]
    InvalidDate { value: String },

    #[error("Invalid configuration value for {field}: {reason} (value: {value})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("Failed to load {name}: {message}")]
    DocumentLoad { name: String, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CvError {
    /// Short message for terminal output.
    pub fn user_friendly_message(&self) -> String {
        match self {
            CvError::InvalidPhoneFormat(e) => e.to_string(),
            CvError::Validation(e) => format!("The CV document is invalid: {}", e),
            CvError::InvalidDate { value } => format!("{:?} is not a YYYY-MM date", value),
            CvError::InvalidConfigValue { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            CvError::ConfigParse { message } => format!("Configuration could not be read: {}", message),
            CvError::DocumentLoad { name, .. } => format!("Could not load the '{}' document", name),
            CvError::Http(_) => "The data server could not be reached".to_string(),
            CvError::Io(e) => format!("File system error: {}", e),
            CvError::Serialization(e) => format!("Malformed JSON: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CvError::InvalidPhoneFormat(_) => "Pass the number as 10 digits without country code or separators",
            CvError::Validation(_) => "Fix the field named in the message and run with --check again",
            CvError::InvalidDate { .. } => "Write dates as YYYY-MM, e.g. 2021-06",
            CvError::InvalidConfigValue { .. } | CvError::ConfigParse { .. } => {
                "Check the configuration file and command-line overrides"
            }
            CvError::DocumentLoad { .. } | CvError::Http(_) => {
                "Check that the data directory or URL contains cv.json or cv.template.json"
            }
            CvError::Io(_) => "Check that the output directory exists and is writable",
            CvError::Serialization(_) => "Validate the JSON syntax of the data document",
        }
    }

    /// The validation error, when this is one.
    pub fn as_validation(&self) -> Option<&CvValidationError> {
        match self {
            CvError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CvError>;
