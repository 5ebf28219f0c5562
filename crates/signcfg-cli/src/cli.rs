//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// signcfg - Discover, validate and generate chipset signing configs
#[derive(Parser, Debug)]
#[command(name = "signcfg")]
#[command(
    author,
    version,
    about = "signcfg - Discover, validate and generate chipset signing configs",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Parser profile (TOML, JSON or YAML) instead of the built-in secimage profile
    #[arg(long, global = true, env = "SIGNCFG_PROFILE")]
    pub profile: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List the chipsets that have a valid config under ROOT
    Chipsets {
        /// Config root containing the configs folder
        root: PathBuf,
    },

    /// List one config path per chipset under ROOT
    Paths {
        /// Config root containing the configs folder
        root: PathBuf,
    },

    /// Print the config path for one chipset
    Locate {
        root: PathBuf,
        chipset: String,
    },

    /// Create the directory for a new chipset
    InitChipset {
        root: PathBuf,
        chipset: String,
    },

    /// Load and validate a config
    ///
    /// Examples:
    ///   signcfg check configs/sdm845/sdm845_secimage.xml
    ///   signcfg check sdm845_secimage.xml --set debug=0x2
    Check {
        file: PathBuf,

        /// Override a general property on every image (TAG=VALUE)
        #[arg(long = "set", value_name = "TAG=VALUE", value_parser = parse_override)]
        overrides: Vec<(String, String)>,
    },

    /// Print the sign id of the image with the given name (case-insensitive)
    SignId {
        file: PathBuf,
        image_name: String,
    },

    /// Load a config, apply overrides and write it out
    Generate {
        file: PathBuf,
        out: PathBuf,

        /// Override a general property on every image (TAG=VALUE)
        #[arg(long = "set", value_name = "TAG=VALUE", value_parser = parse_override)]
        overrides: Vec<(String, String)>,
    },

    /// Print a config as a domain object
    Export {
        file: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Copy a domain object into a config and write the result
    Import {
        /// Config to update
        file: PathBuf,
        /// Domain object (JSON, YAML or TOML)
        object: PathBuf,
        out: PathBuf,
    },

    /// Write the active parser profile to a file
    Profile {
        /// Output file; the format follows the extension
        out: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Yaml,
}

/// Parse a `TAG=VALUE` override.
pub fn parse_override(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((tag, value)) if !tag.trim().is_empty() => {
            Ok((tag.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected TAG=VALUE, got '{s}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn about_names_the_tool() {
        let about = Cli::command().get_about().map(|a| a.to_string()).unwrap_or_default();
        assert!(about.contains("chipset signing configs"), "{about}");
    }

    #[test]
    fn parse_override_splits_on_first_equals() {
        assert_eq!(
            parse_override("debug=0x2").unwrap(),
            ("debug".to_string(), "0x2".to_string())
        );
        assert_eq!(
            parse_override("object_id=a=b").unwrap(),
            ("object_id".to_string(), "a=b".to_string())
        );
        assert!(parse_override("debug").is_err());
        assert!(parse_override("=0x2").is_err());
    }

    #[test]
    fn parse_check_with_overrides() {
        let cli = Cli::try_parse_from([
            "signcfg", "check", "a.xml", "--set", "debug=0x2", "--set", "sw_id=0x1",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Check { file, overrides }) => {
                assert_eq!(file, PathBuf::from("a.xml"));
                assert_eq!(overrides.len(), 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parse_export_format() {
        let cli = Cli::try_parse_from(["signcfg", "export", "a.xml", "--format", "yaml"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Export {
                file: PathBuf::from("a.xml"),
                format: Format::Yaml,
            })
        );
    }
}
