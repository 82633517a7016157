//! Loading a whole vault directory into a note collection.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::{Note, NoteCollection};
use crate::infra::{FsError, scan_notes_directory};

/// A note file that could not be loaded.
#[derive(Debug)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: FsError,
}

/// The notes of a vault plus the files that were skipped.
#[derive(Debug, Default)]
pub struct LoadedVault {
    pub notes: NoteCollection,
    pub failures: Vec<LoadFailure>,
}

/// Reads every note under `dir`.
///
/// A file that cannot be read or decoded is logged, recorded in
/// `failures`, and left out; the rest of the vault still loads.
///
/// # Errors
///
/// Fails only if `dir` itself cannot be scanned.
pub fn load_vault(dir: &Path) -> Result<LoadedVault, FsError> {
    let paths = scan_notes_directory(dir)?;
    debug!(dir = %dir.display(), files = paths.len(), "scanned vault");

    let mut vault = LoadedVault::default();
    for path in paths {
        match Note::from_path(&path) {
            Ok(note) => {
                if let Err(err) = vault.notes.insert(note) {
                    warn!("skipping note: {}", err);
                }
            }
            Err(error) => {
                warn!("skipping {}: {}", path.display(), error);
                vault.failures.push(LoadFailure { path, error });
            }
        }
    }

    Ok(vault)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_all_markdown_notes() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("A.md"), "[[B]]").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/B.md"), "back to [[A]]").unwrap();
        std::fs::write(dir.path().join("readme.txt"), "ignored").unwrap();

        let vault = load_vault(dir.path()).unwrap();
        assert_eq!(vault.notes.len(), 2);
        assert!(vault.failures.is_empty());
        assert_eq!(vault.notes.find_by_title("b").len(), 1);
    }

    #[test]
    fn unreadable_note_is_skipped() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Good.md"), "fine").unwrap();
        std::fs::write(dir.path().join("Bad.md"), [0xFF, 0xFE, b'h', 0]).unwrap();

        let vault = load_vault(dir.path()).unwrap();
        assert_eq!(vault.notes.len(), 1);
        assert_eq!(vault.failures.len(), 1);
        assert!(vault.failures[0].path.ends_with("Bad.md"));
        assert!(matches!(vault.failures[0].error, FsError::InvalidEncoding { .. }));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_vault(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));
    }
}
