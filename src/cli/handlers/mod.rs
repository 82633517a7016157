//! Command handlers for the CLI.

mod backlinks;
mod build;
mod check;
mod completions;

use std::path::Path;

pub use backlinks::{collect_backlinks, handle_backlinks};
pub use build::{BuildSummary, SkippedNote, build_site, handle_build};
pub use check::{check_vault, handle_check};
pub use completions::{handle_completions, write_completions};

/// Shows `path` relative to the vault directory when it lies inside it.
pub(crate) fn vault_relative(path: &Path, notes_dir: &Path) -> String {
    path.strip_prefix(notes_dir)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Truncates a string to at most `max_chars` characters, adding an ellipsis.
pub(crate) fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}
