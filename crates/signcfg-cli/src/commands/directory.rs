//! Config root commands: chipsets, paths, locate, init-chipset

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use signcfg_core::{CfgParser, ConfigDirectory};

use crate::error::Result;

pub fn run_chipsets(root: &Path, parser: Arc<CfgParser>) -> Result<()> {
    let directory = ConfigDirectory::new(root, parser)?;
    let chipsets = directory.chipsets()?;
    if chipsets.is_empty() {
        eprintln!("{}", "No valid configs found".yellow());
    }
    for chipset in chipsets {
        println!("{chipset}");
    }
    Ok(())
}

pub fn run_paths(root: &Path, parser: Arc<CfgParser>) -> Result<()> {
    let directory = ConfigDirectory::new(root, parser)?;
    for path in directory.config_paths()? {
        println!("{path}");
    }
    Ok(())
}

pub fn run_locate(root: &Path, chipset: &str, parser: Arc<CfgParser>) -> Result<()> {
    let directory = ConfigDirectory::new(root, parser)?;
    println!("{}", directory.get_chipset_config_path(chipset)?);
    Ok(())
}

pub fn run_init_chipset(root: &Path, chipset: &str, parser: Arc<CfgParser>) -> Result<()> {
    let directory = ConfigDirectory::new(root, parser)?;
    let dir = directory.create_chipset_dir(chipset)?;
    println!("{} {}", "Created".green().bold(), dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use signcfg_test_utils::{ConfigRoot, SampleConfig};

    fn parser() -> Arc<CfgParser> {
        Arc::new(CfgParser::secimage().unwrap())
    }

    #[test]
    fn init_chipset_creates_directory() {
        let root = ConfigRoot::new();
        run_init_chipset(root.path(), "sdm999", parser()).unwrap();
        assert!(root.configs_dir().join("sdm999").is_dir());
    }

    #[test]
    fn locate_missing_chipset_fails() {
        let root = ConfigRoot::new();
        root.write_config("a", "a_secimage.xml", &SampleConfig::new("a").render());
        assert!(run_locate(root.path(), "a", parser()).is_ok());
        assert!(run_locate(root.path(), "b", parser()).is_err());
    }
}
