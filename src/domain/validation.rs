//! Validation issue types for the check command.
//!
//! These types represent issues found in a vault, such as unreadable files,
//! broken or malformed wiki-links, and notes that would overwrite each other.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::NoteCollection;

/// A validation issue found during checking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// The file where the issue was found.
    pub path: PathBuf,
    /// The kind of validation issue.
    pub kind: ValidationKind,
}

impl ValidationIssue {
    /// Creates a new validation issue.
    pub fn new(path: impl Into<PathBuf>, kind: ValidationKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Creates a read error issue.
    pub fn read_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::new(
            path,
            ValidationKind::ReadError {
                message: message.into(),
            },
        )
    }

    /// Creates a broken link issue.
    pub fn broken_link(path: impl Into<PathBuf>, target: impl Into<String>) -> Self {
        Self::new(
            path,
            ValidationKind::BrokenLink {
                target: target.into(),
            },
        )
    }

    /// Creates a malformed link issue.
    pub fn malformed_link(path: impl Into<PathBuf>, raw: impl Into<String>) -> Self {
        Self::new(path, ValidationKind::MalformedLink { raw: raw.into() })
    }

    /// Creates a slug collision issue.
    pub fn slug_collision(
        path: impl Into<PathBuf>,
        slug: impl Into<String>,
        first_path: impl Into<PathBuf>,
    ) -> Self {
        Self::new(
            path,
            ValidationKind::SlugCollision {
                slug: slug.into(),
                first_path: first_path.into(),
            },
        )
    }

    /// Returns true if this is a broken link.
    pub fn is_broken_link(&self) -> bool {
        matches!(self.kind, ValidationKind::BrokenLink { .. })
    }

    /// Returns the severity of this issue.
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.kind)
    }
}

/// The kind of validation issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationKind {
    /// File could not be read or decoded.
    ReadError { message: String },

    /// A wiki-link targets a title no note has.
    BrokenLink { target: String },

    /// A wiki-link has no target and is kept as plain text.
    MalformedLink { raw: String },

    /// Another note produces the same output filename.
    SlugCollision { slug: String, first_path: PathBuf },
}

impl ValidationKind {
    /// Returns the severity of this kind of issue.
    pub fn severity(&self) -> Severity {
        match self {
            ValidationKind::ReadError { .. } => Severity::Error,
            ValidationKind::SlugCollision { .. } => Severity::Error,
            ValidationKind::BrokenLink { .. } => Severity::Warning,
            ValidationKind::MalformedLink { .. } => Severity::Warning,
        }
    }
}

impl std::fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationKind::ReadError { message } => write!(f, "read error: {}", message),
            ValidationKind::BrokenLink { target } => write!(f, "broken link to '{}'", target),
            ValidationKind::MalformedLink { raw } => {
                write!(f, "malformed link '[[{}]]' kept as text", raw)
            }
            ValidationKind::SlugCollision { slug, first_path } => write!(
                f,
                "output '{}.html' also produced by {}",
                slug,
                first_path.display()
            ),
        }
    }
}

/// Severity level of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth a look; the site still builds correctly.
    Warning,
    /// Output will be wrong or missing.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Summary of validation results.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationSummary {
    /// All issues found during validation.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationSummary {
    /// Creates a new empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an issue to the summary.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Returns the total number of issues.
    pub fn total(&self) -> usize {
        self.issues.len()
    }

    /// Returns the number of errors.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
            .count()
    }

    /// Returns the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Warning)
            .count()
    }

    /// Returns true if there are no issues.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns true if any issue is an error.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Collects link and output issues for a whole collection.
///
/// Malformed links come first, then broken links, then slug collisions, each
/// in collection order.
pub fn validate_notes(notes: &NoteCollection) -> ValidationSummary {
    let mut summary = ValidationSummary::new();

    for note in notes.iter() {
        for err in note.malformed_links() {
            summary.add(ValidationIssue::malformed_link(note.path(), err.raw()));
        }
    }

    for broken in notes.broken_links() {
        summary.add(ValidationIssue::broken_link(&broken.source, broken.link.name()));
    }

    for collision in notes.slug_collisions() {
        if let Some((first, rest)) = collision.paths.split_first() {
            for path in rest {
                summary.add(ValidationIssue::slug_collision(path, &collision.slug, first));
            }
        }
    }

    summary
}
