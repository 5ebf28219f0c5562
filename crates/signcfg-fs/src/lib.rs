//! Filesystem primitives for signing-profile configuration
//!
//! Path composition, directory listing, directory creation, atomic text
//! writes and format-agnostic profile loading. Everything above this crate
//! treats the filesystem through these calls only.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
