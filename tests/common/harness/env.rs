//! Isolated test environment with temp directories.

#![allow(dead_code)]

use super::VaultsiteCommand;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A vault, an output directory and a config home, all in one temp dir
/// that is removed on drop.
pub struct TestEnv {
    _temp_dir: TempDir,
    vault_dir: PathBuf,
    site_dir: PathBuf,
    config_home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let vault_dir = temp_dir.path().join("vault");
        let config_home = temp_dir.path().join("config");
        std::fs::create_dir_all(&vault_dir).expect("Failed to create vault dir");
        std::fs::create_dir_all(&config_home).expect("Failed to create config dir");
        Self {
            site_dir: temp_dir.path().join("site"),
            _temp_dir: temp_dir,
            vault_dir,
            config_home,
        }
    }

    pub fn vault_dir(&self) -> &Path {
        &self.vault_dir
    }

    /// Where `build` is pointed by default.
    pub fn site_dir(&self) -> &Path {
        &self.site_dir
    }

    /// Writes a note at `relative` inside the vault, creating folders.
    pub fn write_note(&self, relative: &str, content: &str) -> PathBuf {
        self.write_bytes(relative, content.as_bytes())
    }

    /// Writes raw bytes into the vault, for encoding tests.
    pub fn write_bytes(&self, relative: &str, content: &[u8]) -> PathBuf {
        let path = self.vault_dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create note folder");
        }
        std::fs::write(&path, content).expect("Failed to write note");
        path
    }

    /// Writes the vaultsite config file for this environment.
    pub fn write_config(&self, toml: &str) -> PathBuf {
        let dir = self.config_home.join("vaultsite");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        let path = dir.join("config.toml");
        std::fs::write(&path, toml).expect("Failed to write config");
        path
    }

    /// Reads a generated file from the site directory.
    pub fn read_site_file(&self, name: &str) -> String {
        let path = self.site_dir.join(name);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    /// A command with isolated config, without `--dir`.
    pub fn bare_cmd(&self) -> VaultsiteCommand {
        VaultsiteCommand::new().config_home(&self.config_home)
    }

    /// A command pointed at this vault with isolated config.
    pub fn cmd(&self) -> VaultsiteCommand {
        self.bare_cmd().dir(&self.vault_dir)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
