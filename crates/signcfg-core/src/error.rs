//! Error types for signcfg-core

use std::path::PathBuf;

use crate::directory::DirectoryProperty;

/// Result type for signcfg-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while discovering, loading or using configs
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing directory, chipset, sign id or image name
    #[error("Not found: {0}")]
    NotFound(String),

    /// Write attempted on a derived, read-only property
    #[error("{property} in a config dir cannot be set")]
    Immutable { property: DirectoryProperty },

    /// Markup is malformed or does not bind to the schema
    #[error("Failed to parse config {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: signcfg_tree::Error,
    },

    /// Loaded tree fails the structural schema check
    #[error("Config {path} is structurally invalid: {source}")]
    InvalidStructure {
        path: PathBuf,
        #[source]
        source: signcfg_tree::Error,
    },

    /// Root-level business rule failed
    #[error("Config {path} violates a rule: {message}")]
    RuleViolation { path: PathBuf, message: String },

    #[error("Version of parser: \"{expected}\" does not match version from config \"{found}\"")]
    VersionMismatch { expected: String, found: String },

    #[error("Config {path} must contain at least one image under the images_list")]
    EmptyConfig { path: PathBuf },

    #[error(
        "Image sign_ids must be unique. Found multiple images with the same sign_id: {}",
        .sign_ids.join(", ")
    )]
    DuplicateSignId { sign_ids: Vec<String> },

    #[error(
        "Multiple sign ids found for image name: {image_name} (sign ids: {})",
        .sign_ids.join(", ")
    )]
    AmbiguousMatch {
        image_name: String,
        sign_ids: Vec<String>,
    },

    /// Domain object is not of the expected root type
    #[error("Expected object of type {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Failed to create directory for chipset: {chipset}: {source}")]
    CreateFailed {
        chipset: String,
        #[source]
        source: signcfg_fs::Error,
    },

    /// Parser profile is not usable (bad pattern, inconsistent structure)
    #[error("Invalid parser profile: {message}")]
    InvalidProfile { message: String },

    #[error(transparent)]
    Fs(#[from] signcfg_fs::Error),

    #[error(transparent)]
    Tree(#[from] signcfg_tree::Error),
}

impl Error {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid_profile(message: impl ToString) -> Self {
        Self::InvalidProfile {
            message: message.to_string(),
        }
    }
}
