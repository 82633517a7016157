//! vaultsite - publish an Obsidian vault as a static HTML site
//!
//! Notes are read from a vault directory, their Obsidian syntax (wiki-links,
//! tags, block references) is rewritten to portable Markdown, and each note
//! is rendered to an HTML page listing the notes that link to it.

pub mod cli;
pub mod domain;
pub mod export;
pub mod infra;
pub mod syntax;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{handle_backlinks, handle_build, handle_check, handle_completions},
};

/// Log level for a `-v` count, used when `RUST_LOG` is unset.
fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vaultsite={}", log_level(verbose))));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Command::Completions(args) = &cli.command {
        return handle_completions(args);
    }

    let config = Config::load()?;
    let notes_dir = config.notes_dir(cli.dir.as_ref());

    match &cli.command {
        Command::Build(args) => handle_build(args, &notes_dir, &config),
        Command::Backlinks(args) => handle_backlinks(args, &notes_dir),
        Command::Check(args) => handle_check(args, &notes_dir),
        Command::Completions(args) => handle_completions(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(log_level(0), "warn");
        assert_eq!(log_level(1), "info");
        assert_eq!(log_level(2), "debug");
        assert_eq!(log_level(3), "trace");
        assert_eq!(log_level(9), "trace");
    }
}
