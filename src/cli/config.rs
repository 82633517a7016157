//! Configuration file support.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::export::RendererKind;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default vault directory
    pub dir: Option<PathBuf>,

    /// Default site output directory
    pub output: Option<PathBuf>,

    /// Title of the generated site
    pub site_title: Option<String>,

    /// Theme name or CSS file path
    pub theme: Option<String>,

    /// Markdown renderer backend
    pub renderer: Option<RendererKind>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/vaultsite/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vaultsite")
            .join("config.toml")
    }

    /// Resolve the vault directory: `--dir`, then config, then the working directory.
    pub fn notes_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        cli_dir
            .cloned()
            .or_else(|| self.dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolve the output directory: `--output`, then config, then `./site`.
    pub fn output_dir(&self, cli_output: Option<&PathBuf>) -> PathBuf {
        cli_output
            .cloned()
            .or_else(|| self.output.clone())
            .unwrap_or_else(|| PathBuf::from("site"))
    }

    pub fn site_title<'a>(&'a self, cli_title: Option<&'a str>) -> &'a str {
        cli_title
            .or(self.site_title.as_deref())
            .unwrap_or("Notes")
    }

    pub fn theme<'a>(&'a self, cli_theme: Option<&'a str>) -> Option<&'a str> {
        cli_theme.or(self.theme.as_deref())
    }

    pub fn renderer(&self, cli_renderer: Option<RendererKind>) -> RendererKind {
        cli_renderer.or(self.renderer).unwrap_or_default()
    }
}
