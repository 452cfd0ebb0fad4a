use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Authentication rejected at offset {offset} (request #{attempt}, HTTP {status})")]
    Auth {
        offset: usize,
        attempt: usize,
        status: u16,
    },

    #[error("Fetch failed at offset {offset} (request #{attempt}): {reason}")]
    TransientFetch {
        offset: usize,
        attempt: usize,
        reason: String,
    },

    #[error("Page {index} not found ({file})")]
    PageNotFound { index: usize, file: String },

    #[error("No saved pages matching '{pattern}' in {}", .dir.display())]
    NoSavedPages { dir: PathBuf, pattern: String },

    #[error("Saved page {file} is not valid JSON: {source}")]
    CorruptPage {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot save page {index} (offset {offset}) to {}: {source}", .path.display())]
    PageSave {
        index: usize,
        offset: usize,
        path: PathBuf,
        #[source]
        source: Box<ExportError>,
    },

    #[error("Cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    Network,
    Storage,
    Configuration,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ExportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ExportError::Auth { .. } => ErrorCategory::Authentication,
            ExportError::TransientFetch { .. } | ExportError::Http(_) => ErrorCategory::Network,
            ExportError::PageNotFound { .. }
            | ExportError::NoSavedPages { .. }
            | ExportError::PageSave { .. }
            | ExportError::Write { .. }
            | ExportError::Io(_) => ErrorCategory::Storage,
            ExportError::ConfigError { .. }
            | ExportError::MissingConfigError { .. }
            | ExportError::InvalidConfigValueError { .. }
            | ExportError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            ExportError::CorruptPage { .. }
            | ExportError::Csv(_)
            | ExportError::Serialization(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Authentication | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => match self {
                ExportError::PageSave { .. } | ExportError::Write { .. } | ExportError::Io(_) => {
                    ErrorSeverity::Critical
                }
                _ => ErrorSeverity::High,
            },
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ExportError::Auth { offset, .. } => format!(
                "Refresh the cookie and CSRF token from a logged-in browser session, then rerun fetch with --start-offset {}",
                offset
            ),
            ExportError::TransientFetch { offset, .. } => format!(
                "Pages before offset {} are saved; run replay for them or rerun fetch with --start-offset {}",
                offset, offset
            ),
            ExportError::NoSavedPages { .. } => {
                "Run the fetch command first to download follower pages".to_string()
            }
            ExportError::PageNotFound { .. } => {
                "Check the pages directory and filename pattern".to_string()
            }
            ExportError::CorruptPage { file, .. } => {
                format!("Delete {} and fetch that page again", file)
            }
            ExportError::PageSave { offset, .. } => format!(
                "Make the pages directory writable, then rerun fetch with --start-offset {}",
                offset
            ),
            ExportError::Write { .. } | ExportError::Io(_) => {
                "Check that the output location exists and is writable".to_string()
            }
            ExportError::ConfigError { .. }
            | ExportError::MissingConfigError { .. }
            | ExportError::InvalidConfigValueError { .. }
            | ExportError::ConfigValidationError { .. } => {
                "Fix the configuration file or command-line flags".to_string()
            }
            ExportError::Http(_) => "Check network connectivity and the API base URL".to_string(),
            ExportError::Csv(_) | ExportError::Serialization(_) => {
                "Inspect the saved page files for unexpected content".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Authentication => format!("LinkedIn rejected the credentials: {}", self),
            ErrorCategory::Network => format!("Download stopped: {}", self),
            ErrorCategory::Storage => format!("File problem: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Data => format!("Unreadable data: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
