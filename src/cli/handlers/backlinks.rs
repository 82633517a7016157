//! Handler for the `backlinks` command.

use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::cli::BacklinksArgs;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::domain::Note;
use crate::infra::load_vault;

use super::{truncate_str, vault_relative};

/// Lists the notes linking to the note(s) titled `title`, ordered by path.
///
/// When several notes share the title, their backlinks are merged.
pub fn collect_backlinks(title: &str, notes_dir: &Path) -> Result<Vec<NoteListing>> {
    let vault = load_vault(notes_dir)
        .with_context(|| format!("failed to load vault at {}", notes_dir.display()))?;

    let targets = vault.notes.find_by_title(title);
    if targets.is_empty() {
        bail!("note not found: {}", title);
    }

    let mut sources: Vec<&Note> = targets
        .iter()
        .flat_map(|target| vault.notes.backlink_notes(target))
        .collect();
    sources.sort_by(|a, b| a.path().cmp(b.path()));
    sources.dedup_by(|a, b| a.path() == b.path());

    Ok(sources
        .into_iter()
        .map(|note| NoteListing {
            title: note.title().to_string(),
            path: vault_relative(note.path(), notes_dir),
            href: note.html_filename(),
        })
        .collect())
}

pub fn handle_backlinks(args: &BacklinksArgs, notes_dir: &Path) -> Result<()> {
    let backlinks = collect_backlinks(&args.title, notes_dir)?;

    match args.format {
        OutputFormat::Human => {
            if backlinks.is_empty() {
                println!("No backlinks found.");
                return Ok(());
            }
            println!("{:<40}  {}", "Title", "Path");
            println!("{:<40}  {}", "-".repeat(40), "-".repeat(40));
            for backlink in &backlinks {
                println!("{:<40}  {}", truncate_str(&backlink.title, 40), backlink.path);
            }
            println!();
            println!("{} backlink(s)", backlinks.len());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(&backlinks))?);
        }
        OutputFormat::Paths => {
            for backlink in &backlinks {
                println!("{}", notes_dir.join(&backlink.path).display());
            }
        }
    }
    Ok(())
}
