//! Command implementations for signcfg-cli

pub mod config;
pub mod directory;
pub mod profile;
pub mod transfer;

use std::path::Path;
use std::sync::Arc;

use signcfg_core::{CfgParser, Overrides};
use signcfg_fs::NormalizedPath;

use crate::error::{CliError, Result};

pub use config::{run_check, run_generate, run_sign_id};
pub use directory::{run_chipsets, run_init_chipset, run_locate, run_paths};
pub use profile::run_profile;
pub use transfer::{run_export, run_import};

/// Parser from `--profile`, or the built-in secimage parser.
pub fn load_parser(profile: Option<&Path>) -> Result<Arc<CfgParser>> {
    let parser = match profile {
        Some(path) => {
            if !path.is_file() {
                return Err(CliError::user(format!(
                    "Profile {} does not exist",
                    path.display()
                )));
            }
            tracing::debug!(path = %path.display(), "using profile file");
            CfgParser::load(&NormalizedPath::new(path))?
        }
        None => CfgParser::secimage()?,
    };
    Ok(Arc::new(parser))
}

pub(crate) fn to_overrides(pairs: &[(String, String)]) -> Overrides {
    pairs.iter().map(|(tag, value)| (tag.as_str(), value.as_str())).collect()
}
