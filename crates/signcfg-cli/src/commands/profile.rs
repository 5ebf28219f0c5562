//! Profile command

use std::path::Path;

use colored::Colorize;
use signcfg_core::CfgParser;
use signcfg_fs::{ConfigStore, NormalizedPath};

use crate::error::Result;

/// Write the active profile; the format follows the extension of `out`.
pub fn run_profile(out: &Path, parser: &CfgParser) -> Result<()> {
    ConfigStore::new().save(&NormalizedPath::new(out), parser.profile())?;
    println!("{} {}", "Wrote profile".green().bold(), out.display());
    Ok(())
}
