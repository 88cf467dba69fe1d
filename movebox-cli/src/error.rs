use movebox_db::StoreError;
use movebox_model::ModelError;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Database operation failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Bad field value or id range
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Malformed command arguments
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// Short description of where the error came from, for the UI.
    pub(crate) fn context(&self) -> Option<&'static str> {
        match self {
            Self::Store(StoreError::Sqlite(_) | StoreError::Schema(_)) => Some("database"),
            Self::Store(StoreError::ImageRead { .. } | StoreError::ImagePlacement { .. }) => {
                Some("image")
            }
            Self::Store(_) => Some("record"),
            Self::Model(_) => Some("value"),
            Self::Config(_) => Some("settings"),
            Self::Io(_) | Self::Usage(_) => None,
        }
    }
}
