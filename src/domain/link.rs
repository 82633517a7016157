//! Wiki-link references between notes.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use crate::infra::{html_filename, slugify};

/// An intra-note location a link points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// A heading, written `Target#Heading`.
    Heading(String),
    /// A block reference, written `Target#^id` or `Target^id`.
    Block(String),
}

impl Anchor {
    /// Returns the URL fragment (without `#`) for this anchor.
    ///
    /// Headings are slugified to match the ids the renderer gives headings.
    /// Block ids are used verbatim, matching the anchor span the block-ref
    /// rewrite emits.
    pub fn fragment(&self) -> String {
        match self {
            Anchor::Heading(heading) => slugify(heading),
            Anchor::Block(id) => id.clone(),
        }
    }
}

/// The kind of error that occurred when parsing a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseLinkErrorKind {
    EmptyTarget,
}

/// Error returned when wiki-link text cannot be parsed.
#[derive(Debug, Clone)]
pub struct ParseLinkError {
    kind: ParseLinkErrorKind,
    raw: String,
}

impl ParseLinkError {
    /// Returns the raw text that failed to parse.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns true if the link had no target note.
    pub fn is_empty_target(&self) -> bool {
        self.kind == ParseLinkErrorKind::EmptyTarget
    }
}

impl fmt::Display for ParseLinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseLinkErrorKind::EmptyTarget => {
                write!(f, "invalid wiki-link '[[{}]]': target cannot be empty", self.raw)
            }
        }
    }
}

impl std::error::Error for ParseLinkError {}

/// A wiki-link reference to a note.
///
/// Parsed from the text between `[[` and `]]`, in the form
/// `Target#Heading^block|Alias`. Every part except the target is optional.
///
/// Identity is the normalized target only: two links are equal when they
/// point at the same note, regardless of alias or anchor.
///
/// # Examples
///
/// ```
/// use vaultsite::domain::Link;
///
/// let link = Link::parse("Other Note#Setup|see setup").unwrap();
/// assert_eq!(link.target(), "other note");
/// assert_eq!(link.alias(), Some("see setup"));
/// assert_eq!(link.to_markdown_link(), "[see setup](other-note.html#setup)");
///
/// assert_eq!(Link::parse("FOO").unwrap(), Link::parse("foo|bar").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Link {
    raw: String,
    name: String,
    target: String, // trimmed + lowercased name
    alias: Option<String>,
    anchor: Option<Anchor>,
    file: Option<PathBuf>,
}

impl Link {
    /// Parses the inner text of a `[[...]]` wiki-link.
    ///
    /// The alias is whatever follows the first `|`. A backslash right before
    /// the pipe (the escaped form Obsidian writes inside tables) is dropped.
    /// From the remainder a `^block` id is split off first, then a `#heading`.
    /// A block id wins over a heading when both are present.
    ///
    /// # Errors
    ///
    /// Returns `ParseLinkError` if nothing remains for the target.
    pub fn parse(raw: &str) -> Result<Self, ParseLinkError> {
        let (reference, alias) = match raw.split_once('|') {
            Some((reference, alias)) => {
                (reference.strip_suffix('\\').unwrap_or(reference), non_empty(alias))
            }
            None => (raw, None),
        };

        let (reference, block) = match reference.split_once('^') {
            Some((reference, block)) => (reference, non_empty(block)),
            None => (reference, None),
        };

        let (name, heading) = match reference.split_once('#') {
            Some((name, heading)) => (name, non_empty(heading)),
            None => (reference, None),
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(ParseLinkError {
                kind: ParseLinkErrorKind::EmptyTarget,
                raw: raw.to_string(),
            });
        }

        let anchor = block.map(Anchor::Block).or(heading.map(Anchor::Heading));

        Ok(Self {
            raw: raw.to_string(),
            name: name.to_string(),
            target: normalize(name),
            alias,
            anchor,
            file: None,
        })
    }

    /// Creates the canonical link to a note from its title and file.
    pub fn for_note(title: &str, file: impl Into<PathBuf>) -> Self {
        let name = title.trim();
        Self {
            raw: title.to_string(),
            name: name.to_string(),
            target: normalize(name),
            alias: None,
            anchor: None,
            file: Some(file.into()),
        }
    }

    /// Returns the original text between the brackets.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the target as written (trimmed, original case).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the normalized target used for comparison.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the display alias, if any.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Returns the heading or block anchor, if any.
    pub fn anchor(&self) -> Option<&Anchor> {
        self.anchor.as_ref()
    }

    /// Returns the file this link was created for, if it is a note's own link.
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Returns the text shown for this link: the alias, or the target as written.
    pub fn display_text(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Returns the slug of the target note.
    pub fn target_slug(&self) -> String {
        slugify(&self.target)
    }

    /// Returns the relative URL of the target page, with fragment if present.
    ///
    /// The fragment is percent-encoded so the URL stays a single Markdown
    /// link destination.
    pub fn href(&self) -> String {
        let page = html_filename(&self.target_slug());
        match &self.anchor {
            Some(anchor) => format!("{}#{}", page, urlencoding::encode(&anchor.fragment())),
            None => page,
        }
    }

    /// Renders this link as a portable Markdown link.
    pub fn to_markdown_link(&self) -> String {
        format!("[{}]({})", escape_link_text(self.display_text()), self.href())
    }
}

impl PartialEq for Link {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target
    }
}

impl Eq for Link {}

impl Hash for Link {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.target.hash(state);
    }
}

impl PartialOrd for Link {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Link {
    fn cmp(&self, other: &Self) -> Ordering {
        self.target.cmp(&other.target)
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[[{}]]", self.raw)
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn non_empty(part: &str) -> Option<String> {
    let trimmed = part.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn escape_link_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '[' || c == ']' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
