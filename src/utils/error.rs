use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Input file not found: {path}")]
    MissingInputFile { path: String },

    #[error("No qualifying items found in {path}")]
    EmptyItemList { path: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidUserInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid selector '{selector}': {message}")]
    SelectorError { selector: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Spreadsheet error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Extraction,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl OrderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            OrderError::MissingInputFile { .. } | OrderError::InvalidUserInput { .. } => {
                ErrorCategory::Input
            }
            OrderError::InvalidConfigValueError { .. }
            | OrderError::ConfigValidationError { .. }
            | OrderError::SelectorError { .. } => ErrorCategory::Configuration,
            OrderError::EmptyItemList { .. } => ErrorCategory::Extraction,
            OrderError::XlsxError(_) | OrderError::SerializationError(_) => ErrorCategory::Output,
            OrderError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Extraction => ErrorSeverity::Medium,
            ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            OrderError::MissingInputFile { path } => format!("Error: {} not found.", path),
            OrderError::EmptyItemList { path } => format!(
                "Failed to retrieve items. Please check if '{}' contains the order table.",
                path
            ),
            OrderError::InvalidUserInput { .. } => {
                "Invalid input. Please enter valid numbers.".to_string()
            }
            OrderError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            OrderError::ConfigValidationError { field, message } => {
                format!("Configuration '{}' could not be loaded: {}", field, message)
            }
            OrderError::SelectorError { selector, .. } => {
                format!("Configured CSS class '{}' is not a valid selector", selector)
            }
            OrderError::IoError(e) => format!("File system error: {}", e),
            OrderError::XlsxError(e) => format!("Could not build the spreadsheet: {}", e),
            OrderError::SerializationError(e) => format!("Could not serialize the order: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            OrderError::MissingInputFile { .. } => {
                "Save the order confirmation page as HTML next to the program, or pass --input"
            }
            OrderError::EmptyItemList { .. } => {
                "Make sure the saved page is the order detail page and the items are not cancelled"
            }
            OrderError::InvalidUserInput { .. } => {
                "Enter a whole row number of at least 1 and plain amounts like 1,234.56"
            }
            OrderError::InvalidConfigValueError { .. }
            | OrderError::ConfigValidationError { .. } => {
                "Check the TOML configuration file against the documented keys"
            }
            OrderError::SelectorError { .. } => {
                "Use bare class names in [selectors], without dots or spaces"
            }
            OrderError::IoError(_) => "Check file permissions and free disk space",
            OrderError::XlsxError(_) => "Check the row number is within the sheet limits",
            OrderError::SerializationError(_) => "Re-run without --dry-run",
        }
    }
}

/// Why a single item row was skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("row has {found} cells, expected at least {expected}")]
    TooFewCells { found: usize, expected: usize },

    #[error("product name element is missing")]
    MissingName,

    #[error("product link is missing")]
    MissingLink,

    #[error("product link '{href}' cannot be resolved: {reason}")]
    InvalidLink { href: String, reason: String },

    #[error("discounted price element is missing")]
    MissingPrice,

    #[error("price text '{raw}' is not a whole number")]
    InvalidPrice { raw: String },
}

impl RowError {
    /// Absent elements are normal on this page; anything else is unexpected markup.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            RowError::TooFewCells { .. } | RowError::MissingName | RowError::MissingLink
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("order date section is missing")]
    SectionMissing,

    #[error("date text '{0}' matches no known format")]
    Unrecognized(String),
}

pub type Result<T> = std::result::Result<T, OrderError>;
