use thiserror::Error;

#[derive(Error, Debug)]
pub enum EligibilityError {
    #[error("Invalid Register Number")]
    InvalidRegisterNumber,

    #[error("Course title is required")]
    CourseTitleRequired,

    #[error("Invalid Admission Year")]
    InvalidAdmissionYear,

    #[error("Malformed request body: {message}")]
    MalformedPayload { message: String },

    #[error("Invalid Department Code")]
    InvalidDepartment,

    #[error("Invalid Department or Register Number")]
    UnresolvedDepartment,

    #[error("No relevant courses found")]
    NoRelevantCourses,

    #[error("Spreadsheet read failed: {0}")]
    XlsxError(#[from] calamine::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Sheet '{sheet}' not found in workbook")]
    SheetMissing { sheet: String },

    #[error("Sheet '{sheet}' does not match the expected layout: {message}")]
    SchemaError { sheet: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Error occurred: {message}")]
    Internal { message: String },
}

/// Coarse classification used by the HTTP layer and the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Lookup,
    NotFound,
    DataSource,
    Configuration,
    Internal,
}

impl EligibilityError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EligibilityError::InvalidRegisterNumber
            | EligibilityError::CourseTitleRequired
            | EligibilityError::InvalidAdmissionYear
            | EligibilityError::MalformedPayload { .. } => ErrorCategory::Validation,
            EligibilityError::InvalidDepartment | EligibilityError::UnresolvedDepartment => {
                ErrorCategory::Lookup
            }
            EligibilityError::NoRelevantCourses => ErrorCategory::NotFound,
            EligibilityError::XlsxError(_)
            | EligibilityError::CsvError(_)
            | EligibilityError::IoError(_)
            | EligibilityError::SheetMissing { .. }
            | EligibilityError::SchemaError { .. } => ErrorCategory::DataSource,
            EligibilityError::ConfigError { .. }
            | EligibilityError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            EligibilityError::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Message suitable for an API client or a terminal user.
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::DataSource => format!("Course data is unavailable: {}", self),
            _ => self.to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        EligibilityError::Internal {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EligibilityError>;
