//! Single-document commands: check, sign-id, generate

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use signcfg_core::{CfgParser, ConfigDocument, LoadOptions};

use super::to_overrides;
use crate::error::Result;

fn load(
    file: &Path,
    overrides: &[(String, String)],
    parser: Arc<CfgParser>,
) -> Result<ConfigDocument> {
    let options = LoadOptions {
        overrides: to_overrides(overrides),
        ..LoadOptions::default()
    };
    Ok(ConfigDocument::load_with(file, parser, options)?)
}

pub fn run_check(
    file: &Path,
    overrides: &[(String, String)],
    parser: Arc<CfgParser>,
) -> Result<()> {
    let document = load(file, overrides, parser)?;

    println!("{} {}", "OK".green().bold(), document.path());
    println!("{}:  {}", "Chipset".dimmed(), document.chipset().cyan());
    println!("{}:  {}", "Version".dimmed(), document.version());
    println!("{}:", "Sign ids".dimmed());
    for sign_id in document.sign_id_list() {
        println!("  {} {}", "+".green(), sign_id);
    }
    Ok(())
}

pub fn run_sign_id(file: &Path, image_name: &str, parser: Arc<CfgParser>) -> Result<()> {
    let document = ConfigDocument::load(file, parser)?;
    println!("{}", document.get_sign_id_for_image_name(image_name)?);
    Ok(())
}

pub fn run_generate(
    file: &Path,
    out: &Path,
    overrides: &[(String, String)],
    parser: Arc<CfgParser>,
) -> Result<()> {
    let document = load(file, overrides, parser)?;
    document.generate(out)?;
    println!("{} {}", "Generated".green().bold(), out.display());
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
    fn generate_applies_overrides() {
        let root = ConfigRoot::new();
        let file = root.write_config("a", "a_secimage.xml", &SampleConfig::new("a").render());
        let out = root.path().join("out.xml");

        run_generate(&file, &out, &[("sw_id".to_string(), "0x9".to_string())], parser()).unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text.matches("<sw_id>0x9</sw_id>").count(), 3);
    }

    #[test]
    fn check_rejects_invalid_override() {
        let root = ConfigRoot::new();
        let file = root.write_config("a", "a_secimage.xml", &SampleConfig::new("a").render());
        let result = run_check(&file, &[("debug".to_string(), "yes".to_string())], parser());
        assert!(result.is_err());
    }
}
