//! cubist - deterministic cube-structure generator
//!
//! Generates, inspects and compares cuboid lists built from a seed.

mod config;
mod diff;
mod generate;
mod inspect;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Deterministic cube-structure generator")]
struct Cli {
    /// Log progress at info level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a structure and write its cuboid list as JSON
    Generate(generate::GenerateArgs),
    /// Print stats, fingerprint and optional layer maps for a cuboid list
    Inspect(inspect::InspectArgs),
    /// Compare two cuboid lists (exit code 1 when they differ)
    Diff(diff::DiffArgs),
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON on stdout stays clean.
    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting cubist v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Generate(args) => generate::run(args)?,
        Command::Inspect(args) => inspect::run(args)?,
        Command::Diff(args) => {
            if !diff::run(args)? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use cubist_core::GenerationMode;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_flags_parse() {
        let cli = Cli::try_parse_from([
            "cubist",
            "generate",
            "--mode",
            "subtractive",
            "--seed",
            "7",
            "--min-size",
            "2",
            "--color",
            "#ff8800",
            "-v",
        ])
        .expect("parse");
        assert!(cli.verbose);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.mode, Some(GenerationMode::Subtractive));
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.min_size, Some(2));
        assert_eq!(args.color.map(|c| c.to_string()), Some("#ff8800".to_string()));
    }

    #[test]
    fn bad_colour_is_rejected_at_parse_time() {
        assert!(Cli::try_parse_from(["cubist", "generate", "--color", "orange"]).is_err());
    }
}
