//! Error types for signcfg-tree

/// Result type for signcfg-tree operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while binding, validating or writing a tree
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed markup at byte {position}: {message}")]
    Xml { position: u64, message: String },

    #[error("Root element mismatch: expected <{expected}>, found <{found}>")]
    RootMismatch { expected: String, found: String },

    #[error("Unexpected element <{name}> in {path}")]
    UnexpectedElement { path: String, name: String },

    #[error("Unexpected attribute '{name}' in {path}")]
    UnexpectedAttribute { path: String, name: String },

    #[error("Field '{name}' in {path} is not described by the schema")]
    UnknownField { path: String, name: String },

    #[error("Missing required field '{field}' in {path}")]
    MissingField { path: String, field: String },

    #[error("Field '{field}' in {path} occurs {count} times but allows at most one")]
    TooMany {
        path: String,
        field: String,
        count: usize,
    },

    #[error("Invalid value for '{field}' in {path}: expected {expected}, got '{value}'")]
    InvalidValue {
        path: String,
        field: String,
        expected: String,
        value: String,
    },

    #[error("Schema does not describe kind '{kind}'")]
    UnknownKind { kind: String },

    #[error("Failed to write markup: {message}")]
    Serialize { message: String },
}

impl Error {
    pub fn xml(position: u64, message: impl ToString) -> Self {
        Self::Xml {
            position,
            message: message.to_string(),
        }
    }

    pub fn serialize(message: impl ToString) -> Self {
        Self::Serialize {
            message: message.to_string(),
        }
    }
}
