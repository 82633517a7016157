//! The note collection and queries over its link graph.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::{Link, Note};

/// Errors building a note collection.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("note already in collection: {path}")]
    DuplicatePath { path: PathBuf },
}

/// A wiki-link whose target matches no note title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    /// The note containing the link.
    pub source: PathBuf,
    /// The unresolved link.
    pub link: Link,
}

/// Several notes whose titles produce the same output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugCollision {
    pub slug: String,
    pub paths: Vec<PathBuf>,
}

/// All notes of one build, the universe for backlink queries.
///
/// Backlinks are recomputed on every query; nothing is cached, so the graph
/// always reflects the notes as they are.
#[derive(Debug, Clone, Default)]
pub struct NoteCollection {
    notes: Vec<Note>,
    paths: HashSet<PathBuf>,
}

impl NoteCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection, rejecting repeated paths.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::DuplicatePath` if two notes share a path.
    pub fn from_notes(notes: impl IntoIterator<Item = Note>) -> Result<Self, GraphError> {
        let mut collection = Self::new();
        for note in notes {
            collection.insert(note)?;
        }
        Ok(collection)
    }

    /// Adds a note.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::DuplicatePath` if a note with the same path exists.
    pub fn insert(&mut self, note: Note) -> Result<(), GraphError> {
        if !self.paths.insert(note.path().to_path_buf()) {
            return Err(GraphError::DuplicatePath {
                path: note.path().to_path_buf(),
            });
        }
        self.notes.push(note);
        Ok(())
    }

    /// Returns the notes in insertion order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Returns the note stored under `path`.
    pub fn get(&self, path: &Path) -> Option<&Note> {
        self.notes.iter().find(|n| n.path() == path)
    }

    /// Returns every note whose title matches, case-insensitively.
    pub fn find_by_title(&self, title: &str) -> Vec<&Note> {
        let wanted = Link::for_note(title, PathBuf::new());
        self.notes.iter().filter(|n| *n.link() == wanted).collect()
    }

    /// Returns the notes linking to `note`, ordered by their paths.
    pub fn backlinks(&self, note: &Note) -> Vec<Link> {
        note.find_backlinks(&self.notes)
    }

    /// Returns the notes linking to `note`, as notes.
    pub fn backlink_notes(&self, note: &Note) -> Vec<&Note> {
        self.backlinks(note)
            .iter()
            .filter_map(|link| link.file().and_then(|path| self.get(path)))
            .collect()
    }

    /// Returns every link whose target matches no note, in note order.
    pub fn broken_links(&self) -> Vec<BrokenLink> {
        let known: HashSet<&str> = self.notes.iter().map(|n| n.link().target()).collect();
        let known = &known;

        self.notes
            .iter()
            .flat_map(move |note| {
                note.links()
                    .iter()
                    .filter(move |link| !known.contains(link.target()))
                    .map(move |link| BrokenLink {
                        source: note.path().to_path_buf(),
                        link: link.clone(),
                    })
            })
            .collect()
    }

    /// Returns groups of notes that would be written to the same file.
    pub fn slug_collisions(&self) -> Vec<SlugCollision> {
        let mut by_slug: BTreeMap<&str, Vec<PathBuf>> = BTreeMap::new();
        for note in &self.notes {
            by_slug
                .entry(note.slug())
                .or_default()
                .push(note.path().to_path_buf());
        }

        by_slug
            .into_iter()
            .filter(|(_, paths)| paths.len() > 1)
            .map(|(slug, mut paths)| {
                paths.sort();
                SlugCollision {
                    slug: slug.to_string(),
                    paths,
                }
            })
            .collect()
    }
}
