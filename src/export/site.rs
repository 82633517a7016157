//! Static site generation for a whole vault.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::NoteCollection;
use crate::export::html::MarkdownRenderer;
use crate::export::template::{PageLink, render_index_page, render_note_page};
use crate::export::theme::get_theme_css;
use crate::infra::{ensure_dir, write_atomic};

/// Configuration for site generation.
pub struct SiteConfig<'a> {
    /// Title of the index page, also shown on every note page.
    pub site_title: &'a str,
    /// Theme name or path to CSS file.
    pub theme: Option<&'a str>,
    /// Write bare `<div id="content">` fragments instead of full pages.
    pub fragments_only: bool,
}

impl Default for SiteConfig<'_> {
    fn default() -> Self {
        Self {
            site_title: "Notes",
            theme: None,
            fragments_only: false,
        }
    }
}

/// A note whose page could not be produced.
#[derive(Debug, Clone, Serialize)]
pub struct FailedNote {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of site generation.
#[derive(Debug, Default, Serialize)]
pub struct SiteResult {
    /// Number of note pages written.
    pub notes_exported: usize,
    /// Files written for notes, in collection order.
    pub pages: Vec<PathBuf>,
    /// Notes skipped because rendering failed.
    pub failed: Vec<FailedNote>,
    /// Wiki-links pointing at titles no note has.
    pub broken_links: usize,
    /// Output files claimed by more than one note; the later note wins.
    pub slug_collisions: usize,
}

/// Renders every note of `notes` into `output_dir`.
///
/// Each note becomes `<slug>.html`. Unless `fragments_only` is set, pages are
/// wrapped in the note template with their backlinks, and `index.html` and
/// `style.css` are written too. A note that fails to render is logged and
/// skipped.
///
/// # Errors
///
/// Fails on an unknown theme or when an output file cannot be written.
pub fn generate_site(
    notes: &NoteCollection,
    output_dir: &Path,
    renderer: &dyn MarkdownRenderer,
    config: &SiteConfig,
) -> Result<SiteResult> {
    let theme_css = if config.fragments_only {
        None
    } else {
        Some(get_theme_css(config.theme)?)
    };
    ensure_dir(output_dir)?;

    let mut result = SiteResult::default();
    // Keyed by href: when slugs collide the later note overwrites the page.
    let mut index_entries: BTreeMap<String, PageLink> = BTreeMap::new();

    for collision in notes.slug_collisions() {
        warn!(
            slug = %collision.slug,
            "{} notes share the output file {}.html",
            collision.paths.len(),
            collision.slug
        );
        result.slug_collisions += collision.paths.len() - 1;
    }

    for broken in notes.broken_links() {
        debug!(source = %broken.source.display(), "broken link {}", broken.link);
        result.broken_links += 1;
    }

    for note in notes.iter() {
        let fragment = match note.render_html(renderer) {
            Ok(fragment) => fragment,
            Err(err) => {
                warn!("skipping {}: {}", note.path().display(), err);
                result.failed.push(FailedNote {
                    path: note.path().to_path_buf(),
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let page = if config.fragments_only {
            fragment
        } else {
            let backlinks: Vec<PageLink> = notes
                .backlink_notes(note)
                .into_iter()
                .map(PageLink::to_note)
                .collect();
            render_note_page(note, &fragment, &backlinks, config.site_title)
                .with_context(|| format!("failed to render page for {}", note.path().display()))?
        };

        let target = output_dir.join(note.html_filename());
        write_atomic(&target, &page)?;
        debug!(note = note.title(), output = %target.display(), "wrote page");
        result.notes_exported += 1;
        result.pages.push(target);

        let entry = PageLink::to_note(note);
        index_entries.insert(entry.href.clone(), entry);
    }

    if let Some(theme_css) = theme_css {
        write_atomic(&output_dir.join("style.css"), &theme_css)?;

        let mut entries: Vec<PageLink> = index_entries.into_values().collect();
        entries.sort_by_key(|e| e.title.to_lowercase());

        let index = render_index_page(&entries, config.site_title, Local::now())?;
        write_atomic(&output_dir.join("index.html"), &index)?;
    }

    info!(
        pages = result.notes_exported,
        failed = result.failed.len(),
        "site written to {}",
        output_dir.display()
    );
    Ok(result)
}
