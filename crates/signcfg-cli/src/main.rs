//! signcfg CLI
//!
//! Scans config roots, validates chipset signing configs and moves them
//! to and from their domain-object form.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(cmd) => execute_command(cmd, cli.profile.as_deref()),
        None => {
            println!("{} chipset signing configs", "signcfg".green().bold());
            println!();
            println!("Run {} for available commands.", "signcfg --help".cyan());
            Ok(())
        }
    }
}

/// Logs go to stderr. `--verbose` forces debug; otherwise `RUST_LOG`
/// applies, defaulting to warnings so skipped files are visible.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let initialized = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
    if initialized.is_ok() && verbose {
        tracing::debug!("Verbose mode enabled");
    }
}

fn execute_command(cmd: Commands, profile: Option<&std::path::Path>) -> Result<()> {
    let parser = commands::load_parser(profile)?;
    match cmd {
        Commands::Chipsets { root } => commands::run_chipsets(&root, parser),
        Commands::Paths { root } => commands::run_paths(&root, parser),
        Commands::Locate { root, chipset } => commands::run_locate(&root, &chipset, parser),
        Commands::InitChipset { root, chipset } => {
            commands::run_init_chipset(&root, &chipset, parser)
        }
        Commands::Check { file, overrides } => commands::run_check(&file, &overrides, parser),
        Commands::SignId { file, image_name } => {
            commands::run_sign_id(&file, &image_name, parser)
        }
        Commands::Generate {
            file,
            out,
            overrides,
        } => commands::run_generate(&file, &out, &overrides, parser),
        Commands::Export { file, format } => commands::run_export(&file, format, parser),
        Commands::Import { file, object, out } => {
            commands::run_import(&file, &object, &out, parser)
        }
        Commands::Profile { out } => commands::run_profile(&out, &parser),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signcfg_test_utils::ConfigRoot;

    #[test]
    fn test_cli_error_user() {
        let error = crate::error::CliError::user("test error");
        assert_eq!(format!("{}", error), "test error");
    }

    #[test]
    fn test_profile_round_trip_through_file() {
        let root = ConfigRoot::new();
        let out = root.path().join("profile.toml");

        execute_command(Commands::Profile { out: out.clone() }, None).unwrap();
        let parser = commands::load_parser(Some(out.as_path())).unwrap();
        assert_eq!(parser.version(), "2.0");
    }

    #[test]
    fn test_missing_profile_file_fails() {
        let root = ConfigRoot::new();
        let missing = root.path().join("missing.toml");
        assert!(commands::load_parser(Some(missing.as_path())).is_err());
    }
}
