//! Domain-object commands: export, import

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use signcfg_core::{CfgParser, ConfigDocument, ConfigObject};
use signcfg_fs::{ConfigStore, NormalizedPath};

use crate::cli::Format;
use crate::error::{CliError, Result};

pub fn run_export(file: &Path, format: Format, parser: Arc<CfgParser>) -> Result<()> {
    let document = ConfigDocument::load(file, parser)?;
    let mut object = ConfigObject::root(document.parser());
    document.transfer_to_obj(&mut object)?;

    let rendered = match format {
        Format::Json => serde_json::to_string_pretty(&object).map_err(CliError::render)?,
        Format::Yaml => serde_yaml::to_string(&object).map_err(CliError::render)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

pub fn run_import(file: &Path, object: &Path, out: &Path, parser: Arc<CfgParser>) -> Result<()> {
    let mut document = ConfigDocument::load(file, parser)?;
    let object: ConfigObject = ConfigStore::new().load(&NormalizedPath::new(object))?;

    document.transfer_from_obj(&object)?;
    document.validate()?;
    document.generate(out)?;
    println!("{} {}", "Generated".green().bold(), out.display());
    Ok(())
}
