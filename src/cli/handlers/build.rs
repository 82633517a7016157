//! Handler for the `build` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::BuildArgs;
use crate::cli::config::Config;
use crate::cli::output::{Output, OutputFormat};
use crate::export::{SiteConfig, generate_site};
use crate::infra::load_vault;

use super::vault_relative;

/// A note that produced no page.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedNote {
    pub path: String,
    pub reason: String,
}

/// What a build did.
#[derive(Debug, Serialize)]
pub struct BuildSummary {
    pub output: PathBuf,
    pub renderer: String,
    pub pages: Vec<PathBuf>,
    pub skipped: Vec<SkippedNote>,
    pub broken_links: usize,
    pub slug_collisions: usize,
}

/// Loads the vault and writes the site.
pub fn build_site(args: &BuildArgs, notes_dir: &Path, config: &Config) -> Result<BuildSummary> {
    let vault = load_vault(notes_dir)
        .with_context(|| format!("failed to load vault at {}", notes_dir.display()))?;

    let output_dir = config.output_dir(args.output.as_ref());
    let renderer = config.renderer(args.renderer).build();
    let site_config = SiteConfig {
        site_title: config.site_title(args.title.as_deref()),
        theme: config.theme(args.theme.as_deref()),
        fragments_only: args.fragments,
    };

    info!(
        notes = vault.notes.len(),
        renderer = renderer.name(),
        "building site from {}",
        notes_dir.display()
    );
    let result = generate_site(&vault.notes, &output_dir, renderer.as_ref(), &site_config)
        .with_context(|| format!("failed to build site in {}", output_dir.display()))?;

    let skipped = vault
        .failures
        .iter()
        .map(|f| SkippedNote {
            path: vault_relative(&f.path, notes_dir),
            reason: f.error.to_string(),
        })
        .chain(result.failed.iter().map(|f| SkippedNote {
            path: vault_relative(&f.path, notes_dir),
            reason: f.reason.clone(),
        }))
        .collect();

    Ok(BuildSummary {
        output: output_dir,
        renderer: renderer.name().to_string(),
        pages: result.pages,
        skipped,
        broken_links: result.broken_links,
        slug_collisions: result.slug_collisions,
    })
}

pub fn handle_build(args: &BuildArgs, notes_dir: &Path, config: &Config) -> Result<()> {
    let summary = build_site(args, notes_dir, config)?;

    match args.format {
        OutputFormat::Human => {
            println!(
                "Built {} page(s) in {}",
                summary.pages.len(),
                summary.output.display()
            );
            for skipped in &summary.skipped {
                println!("  skipped: {}: {}", skipped.path, skipped.reason);
            }
            if summary.broken_links > 0 {
                println!(
                    "{} broken link(s); run `vaultsite check` for details",
                    summary.broken_links
                );
            }
            if summary.slug_collisions > 0 {
                println!(
                    "{} note(s) overwrote another note's page",
                    summary.slug_collisions
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(&summary))?);
        }
        OutputFormat::Paths => {
            for page in &summary.pages {
                println!("{}", page.display());
            }
        }
    }
    Ok(())
}
