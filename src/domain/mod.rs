//! Core types: Link, Note, the note collection and its validation

mod graph;
mod link;
mod note;
mod validation;

pub use graph::{BrokenLink, GraphError, NoteCollection, SlugCollision};
pub use link::{Anchor, Link, ParseLinkError};
pub use note::Note;
pub use validation::{Severity, ValidationIssue, ValidationKind, ValidationSummary, validate_notes};
