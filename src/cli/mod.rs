//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::export::RendererKind;
use output::OutputFormat;

/// vaultsite - publish an Obsidian vault as a static HTML site
#[derive(Parser, Debug)]
#[command(name = "vaultsite", version, about, long_about = None)]
pub struct Cli {
    /// Vault directory (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render every note to HTML
    Build(BuildArgs),

    /// Show notes that link to a given note
    Backlinks(BacklinksArgs),

    /// Check for broken links, malformed links and clashing output files
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `build` command
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Output directory for the site
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Site title shown on the index page
    #[arg(long)]
    pub title: Option<String>,

    /// CSS theme (default, dark, or path to CSS file)
    #[arg(long)]
    pub theme: Option<String>,

    /// Markdown renderer backend
    #[arg(long, value_enum)]
    pub renderer: Option<RendererKind>,

    /// Write bare HTML fragments without page template, index or stylesheet
    #[arg(long)]
    pub fragments: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `backlinks` command
#[derive(Parser, Debug)]
pub struct BacklinksArgs {
    /// Title of the note (case-insensitive)
    pub title: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `check` command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
