//! Infrastructure: file system access, vault loading and slugs.

mod fs;
mod slug;
mod vault;

pub use fs::{FsError, decode_text, ensure_dir, read_text, scan_notes_directory, write_atomic};
pub use slug::{html_filename, slugify};
pub use vault::{LoadFailure, LoadedVault, load_vault};
