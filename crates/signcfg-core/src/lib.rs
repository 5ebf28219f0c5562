//! Chipset signing-profile configs
//!
//! - [`ConfigDirectory`] scans a config root and finds one document per
//!   chipset directory
//! - [`ConfigDocument`] loads, overrides and validates a single document
//!   and transfers it to and from a [`ConfigObject`]
//! - [`CfgParser`] bundles the expected version, layout constants,
//!   structure description and rules of one config family

pub mod defines;
pub mod diagnostics;
pub mod directory;
pub mod document;
pub mod error;
pub mod object;
pub mod overrides;
pub mod parser;
pub mod rules;
pub mod secimage;

pub use defines::{ClassNaming, Defines, NamingConvention, tags};
pub use diagnostics::{DiagnosticSink, Level, MemorySink, TracingSink, default_sink};
pub use directory::{ConfigDirectory, DirectoryProperty};
pub use document::{ConfigDocument, LoadOptions, duplicate_values};
pub use error::{Error, Result};
pub use object::{ConfigObject, ObjectFactory};
pub use overrides::{OverrideValue, Overrides};
pub use parser::{CfgParser, Profile};
pub use rules::{Rule, RuleEngine, RuleSet};
