use crate::core::attachments::AttachmentError;
use crate::core::submission::SubmitError;
use crate::domain::model::DraftError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JansunwaiError {
    #[error("Intake request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error in {field}: {message}")]
    ConfigParseError { field: String, message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Draft error: {0}")]
    Draft(#[from] DraftError),

    #[error("Attachment error: {0}")]
    Attachment(#[from] AttachmentError),

    #[error("Submission error: {0}")]
    Submission(#[from] SubmitError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Intake,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl JansunwaiError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigParseError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::Draft(_) | Self::Attachment(_) => ErrorCategory::Input,
            Self::Submission(e) if e.is_validation() => ErrorCategory::Input,
            Self::HttpError(_) | Self::Submission(_) => ErrorCategory::Intake,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Draft(_) | Self::Attachment(_) => ErrorSeverity::Low,
            Self::Submission(e) if e.is_validation() => ErrorSeverity::Low,
            Self::Submission(e) if e.is_retryable() => ErrorSeverity::Medium,
            Self::HttpError(_) => ErrorSeverity::Medium,
            Self::Submission(_)
            | Self::ConfigParseError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ConfigParseError { .. } => "Check the TOML syntax of the configuration file",
            Self::MissingConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the reported configuration value and run again"
            }
            Self::Draft(_) => "Pick a subcategory that belongs to the selected department",
            Self::Attachment(_) => "Refresh the attachment list and retry with a valid position",
            Self::Submission(SubmitError::ValidationFailed { .. }) => {
                "Fill in the missing fields and submit again"
            }
            Self::Submission(SubmitError::InFlight) => {
                "Wait for the pending submission to finish"
            }
            Self::Submission(SubmitError::AlreadySubmitted) => {
                "Start a new filing session for another complaint"
            }
            Self::Submission(_) | Self::HttpError(_) => {
                "The intake service could not record the complaint, try again shortly"
            }
            Self::IoError(_) => "Check that the file exists and is readable",
            Self::SerializationError(_) => "Check the structure of the JSON payload",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("The complaint cannot be filed yet: {}", self),
            ErrorCategory::Intake => format!("The complaint was not recorded: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, JansunwaiError>;
