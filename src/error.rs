use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixEmailsError {
    #[error("Failed to open index file {}: {source}", .path.display())]
    IndexOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read index file {}: {source}", .path.display())]
    IndexRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open email file {}: {source}", .path.display())]
    EmailOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read email file {}: {source}", .path.display())]
    EmailRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Operation was cancelled by user")]
    Cancelled,
}

impl FixEmailsError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            FixEmailsError::Config { .. } => 2,
            FixEmailsError::IndexOpen { .. } | FixEmailsError::IndexRead { .. } => 3,
            FixEmailsError::EmailOpen { .. } | FixEmailsError::EmailRead { .. } => 4,
            FixEmailsError::OutputWrite { .. } => 5,
            FixEmailsError::Cancelled => 130, // Interrupted (SIGINT)
            FixEmailsError::Io(_) => 1,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for FixEmailsError {
    fn user_message(&self) -> String {
        match self {
            FixEmailsError::IndexOpen { path, .. } => {
                format!("Cannot open index file: {}", path.display())
            }
            FixEmailsError::EmailOpen { path, .. } => {
                format!("Cannot open email file listed in the index: {}", path.display())
            }
            FixEmailsError::OutputWrite { path, .. } => {
                format!("Cannot write result file: {}", path.display())
            }
            FixEmailsError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            FixEmailsError::IndexOpen { .. } => Some(
                "Run from the directory containing 1.txt, or point to the index with --index.".to_string()
            ),
            FixEmailsError::EmailOpen { .. } => Some(
                "Check that every line of the index names an existing file. Use --base-dir if the names are relative to another directory, or --skip-blank-lines if the index has empty lines.".to_string()
            ),
            FixEmailsError::OutputWrite { .. } => Some(
                "Ensure you have write permission in the directory holding the email files.".to_string()
            ),
            FixEmailsError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all fields have valid values.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for FixEmailsError {
    fn from(error: toml::de::Error) -> Self {
        FixEmailsError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FixEmailsError>;
