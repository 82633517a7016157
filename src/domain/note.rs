//! Note: one source document of the vault.

use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use crate::domain::{Link, ParseLinkError};
use crate::export::{MarkdownRenderer, RenderError, RenderFeatures};
use crate::infra::{FsError, html_filename, read_text, slugify};
use crate::syntax::{rewrite_scanned, scan_wiki_links};

/// A parsed vault note.
///
/// Built once from its file: outgoing links are extracted from the raw text
/// first, then the inline syntax is rewritten. Nothing changes afterwards.
///
/// Identity is the file path. Two files with the same title are two notes.
///
/// # Examples
///
/// ```
/// use vaultsite::domain::Note;
///
/// let note = Note::from_content("vault/Daily Log.md", "Met [[Alice]] about #budget");
/// assert_eq!(note.title(), "Daily Log");
/// assert_eq!(note.slug(), "daily-log");
/// assert_eq!(note.links()[0].target(), "alice");
/// assert!(note.content().contains("[Alice](alice.html)"));
/// ```
#[derive(Debug, Clone)]
pub struct Note {
    path: PathBuf,
    title: String,
    slug: String,
    link: Link,
    raw_content: String,
    content: String,
    links: Vec<Link>,
    malformed: Vec<ParseLinkError>,
}

impl Note {
    /// Reads and parses the note at `path`.
    ///
    /// # Errors
    ///
    /// Returns `FsError` if the file cannot be read or is not UTF-8.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FsError> {
        let path = path.as_ref();
        let content = read_text(path)?;
        Ok(Self::from_content(path, content))
    }

    /// Parses a note from content already in memory.
    pub fn from_content(path: impl Into<PathBuf>, raw_content: impl Into<String>) -> Self {
        let path = path.into();
        let raw_content = raw_content.into();

        let title = title_from_path(&path);
        let slug = slugify(&title);
        let link = Link::for_note(&title, path.clone());

        let spans = scan_wiki_links(&raw_content);
        let mut links = Vec::with_capacity(spans.len());
        let mut malformed = Vec::new();
        for span in &spans {
            match &span.parsed {
                Ok(parsed) => links.push(parsed.clone()),
                Err(err) => {
                    tracing::debug!(path = %path.display(), error = %err, "keeping malformed wiki-link as text");
                    malformed.push(err.clone());
                }
            }
        }

        let content = rewrite_scanned(&raw_content, &spans);

        Self {
            path,
            title,
            slug,
            link,
            raw_content,
            content,
            links,
            malformed,
        }
    }

    /// Returns the file path identifying this note.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the title (file name without extension).
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the slug used for the output file.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Returns the output HTML filename, `<slug>.html`.
    pub fn html_filename(&self) -> String {
        html_filename(&self.slug)
    }

    /// Returns this note's canonical link (its own title and path).
    pub fn link(&self) -> &Link {
        &self.link
    }

    /// Returns the file content as read.
    pub fn raw_content(&self) -> &str {
        &self.raw_content
    }

    /// Returns the content after syntax rewriting.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns outgoing links in order of appearance, duplicates included.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Returns the wiki-links that could not be parsed and were kept as text.
    pub fn malformed_links(&self) -> &[ParseLinkError] {
        &self.malformed
    }

    /// Returns true if any outgoing link points at `link`'s target.
    pub fn links_to(&self, link: &Link) -> bool {
        self.links.contains(link)
    }

    /// Finds the notes in `all` that link to this note.
    ///
    /// Returns the canonical link of each referencing note, ordered by the
    /// referencing note's path. This note itself is skipped even when it
    /// links to its own title.
    pub fn find_backlinks(&self, all: &[Note]) -> Vec<Link> {
        let mut backlinks: Vec<Link> = all
            .iter()
            .filter(|other| *other != self)
            .filter(|other| other.links_to(&self.link))
            .map(|other| other.link.clone())
            .collect();

        backlinks.sort_by(|a, b| a.file().cmp(&b.file()));
        backlinks
    }

    /// Renders the processed content to an HTML fragment.
    ///
    /// The result is wrapped in `<div id="content">`. Escaped braces are
    /// escaped once more first, because renderers consume one level and
    /// math typesetting needs `\{` to survive.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if the renderer backend fails.
    pub fn render_html(&self, renderer: &dyn MarkdownRenderer) -> Result<String, RenderError> {
        let document = escape_braces(&self.content);
        let html = renderer.render(&document, &RenderFeatures::default())?;
        Ok(format!("<div id=\"content\">{}</div>", html))
    }
}

impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Note {}

impl Hash for Note {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn escape_braces(document: &str) -> String {
    document.replace(r"\{", r"\\{").replace(r"\}", r"\\}")
}
