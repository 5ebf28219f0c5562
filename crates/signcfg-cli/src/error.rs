//! Error types for signcfg-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] signcfg_core::Error),

    #[error(transparent)]
    Fs(#[from] signcfg_fs::Error),

    #[error("Failed to render output: {0}")]
    Render(String),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    pub fn render(error: impl ToString) -> Self {
        Self::Render(error.to_string())
    }
}
