//! Check command handler.

use std::cmp::Reverse;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::cli::CheckArgs;
use crate::cli::output::{Output, OutputFormat};
use crate::domain::{ValidationIssue, ValidationSummary, validate_notes};
use crate::infra::load_vault;

/// Loads the vault and collects every issue, with paths relative to the vault.
pub fn check_vault(notes_dir: &Path) -> Result<ValidationSummary> {
    let vault = load_vault(notes_dir)
        .with_context(|| format!("failed to load vault at {}", notes_dir.display()))?;

    let mut summary = validate_notes(&vault.notes);
    for failure in &vault.failures {
        summary.add(ValidationIssue::read_error(&failure.path, failure.error.to_string()));
    }

    for issue in &mut summary.issues {
        if let Ok(relative) = issue.path.strip_prefix(notes_dir) {
            issue.path = relative.to_path_buf();
        }
    }
    summary.issues.sort_by_key(|issue| Reverse(issue.severity()));

    Ok(summary)
}

pub fn handle_check(args: &CheckArgs, notes_dir: &Path) -> Result<()> {
    let summary = check_vault(notes_dir)?;

    match args.format {
        OutputFormat::Human => {
            if summary.is_empty() {
                println!("All notes OK.");
                return Ok(());
            }
            for issue in &summary.issues {
                println!("{}: {}", issue.severity(), issue);
            }
            println!(
                "\nFound {} issue(s): {} error(s), {} warning(s)",
                summary.total(),
                summary.error_count(),
                summary.warning_count()
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(&summary))?);
        }
        OutputFormat::Paths => {
            let mut paths: Vec<&PathBuf> = summary.issues.iter().map(|i| &i.path).collect();
            paths.sort();
            paths.dedup();
            for path in paths {
                println!("{}", notes_dir.join(path).display());
            }
        }
    }

    if !summary.is_empty() {
        bail!("check found {} issue(s)", summary.total());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Severity, ValidationKind};
    use tempfile::TempDir;

    #[test]
    fn clean_vault_passes() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("A.md"), "[[B]]").unwrap();
        std::fs::write(dir.path().join("B.md"), "[[A#Top]]").unwrap();

        let summary = check_vault(dir.path()).unwrap();
        assert!(summary.is_empty());
    }

    #[test]
    fn reports_relative_paths_errors_first() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/A.md"), "[[Ghost]] and [[]]").unwrap();
        std::fs::write(dir.path().join("Bad.md"), [0xFE, 0xFF, 0, b'x']).unwrap();

        let summary = check_vault(dir.path()).unwrap();

        assert_eq!(summary.total(), 3);
        assert_eq!(summary.issues[0].severity(), Severity::Error);
        assert_eq!(summary.issues[0].path, PathBuf::from("Bad.md"));
        assert!(
            summary
                .issues
                .iter()
                .any(|i| i.path == Path::new("sub/A.md") && i.is_broken_link())
        );
        assert!(summary.issues.iter().any(|i| matches!(
            &i.kind,
            ValidationKind::MalformedLink { raw } if raw.is_empty()
        )));
    }

    #[test]
    fn handle_check_fails_on_issues() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("A.md"), "[[Nowhere]]").unwrap();

        let args = CheckArgs {
            format: OutputFormat::Json,
        };
        let err = handle_check(&args, dir.path()).unwrap_err();
        assert_eq!(err.to_string(), "check found 1 issue(s)");
    }
}
