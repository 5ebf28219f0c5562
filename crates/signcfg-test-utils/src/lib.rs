//! Shared test utilities for the signcfg workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`root`] - [`ConfigRoot`] temporary `<root>/configs/<chipset>/` layouts
//! - [`sample`] - [`SampleConfig`] builder for secimage documents

pub mod root;
pub mod sample;

pub use root::ConfigRoot;
pub use sample::{SampleConfig, SampleImage};
