//! End-to-end CLI test suite.
//!
//! Each test builds a small vault in a temp directory and drives the binary
//! through its public interface.

mod common;

use common::harness::TestEnv;
use predicates::prelude::*;
use serde_json::Value;

fn sample_vault() -> TestEnv {
    let env = TestEnv::new();
    env.write_note(
        "Home.md",
        "# Welcome\n\nStart at [[Projects]] or read [[Log|the log]].\n#index\n",
    );
    env.write_note(
        "Projects.md",
        "# Projects\n\n- [[Home]] ^list\n- see [[Projects#Active]]\n\n## Active\n",
    );
    env.write_note("Daily/Log.md", "Back to [[home]].\n");
    env.write_note(".obsidian/workspace.md", "[[Home]]");
    env
}

// ===========================================
// build command tests
// ===========================================
mod build_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn build_writes_pages_index_and_style() {
        let env = sample_vault();

        env.cmd()
            .build(env.site_dir())
            .assert()
            .success()
            .stdout(predicate::str::contains("Built 3 page(s)"));

        for name in ["home.html", "projects.html", "log.html", "index.html", "style.css"] {
            assert!(env.site_dir().join(name).exists(), "missing {}", name);
        }
        assert!(!env.site_dir().join("workspace.html").exists());
    }

    #[test]
    fn build_rewrites_obsidian_syntax() {
        let env = sample_vault();
        env.cmd().build(env.site_dir()).assert().success();

        let home = env.read_site_file("home.html");
        assert!(home.contains(r#"<a href="projects.html">Projects</a>"#));
        assert!(home.contains(r#"<a href="log.html">the log</a>"#));
        assert!(home.contains(r#"<span class="tag">index</span>"#));
        assert!(home.contains(r#"<div id="content">"#));

        let projects = env.read_site_file("projects.html");
        assert!(projects.contains(r#"<span id="list"></span>"#));
        assert!(projects.contains(r#"<a href="projects.html#active">Projects</a>"#));
        assert!(projects.contains(r#"<h2 id="active">Active</h2>"#));
    }

    #[test]
    fn build_lists_backlinks_on_pages() {
        let env = sample_vault();
        env.cmd().build(env.site_dir()).assert().success();

        let home = env.read_site_file("home.html");
        let backlinks = &home[home.find("Linked from").expect("no backlinks section")..];
        assert!(backlinks.contains(r#"<a href="log.html">Log</a>"#));
        assert!(backlinks.contains(r#"<a href="projects.html">Projects</a>"#));
        assert!(backlinks.find("log.html") < backlinks.find("projects.html"));

        // Projects links to itself, which is not a backlink.
        let projects = env.read_site_file("projects.html");
        let section = &projects[projects.find("Linked from").unwrap()..];
        assert!(section.contains("home.html"));
        assert!(!section.contains(r#"<a href="projects.html">"#));
    }

    #[test]
    fn build_fragments_only() {
        let env = sample_vault();
        env.cmd()
            .build(env.site_dir())
            .args(["--fragments"])
            .assert()
            .success();

        let log = env.read_site_file("log.html");
        assert!(log.starts_with(r#"<div id="content">"#));
        assert!(!env.site_dir().join("index.html").exists());
    }

    #[test]
    fn build_json_summary() {
        let env = sample_vault();
        env.write_note("Orphan.md", "points at [[Nowhere]]");

        let json: Value = env.cmd().build(env.site_dir()).format_json().output_json();

        assert_eq!(json["data"]["pages"].as_array().unwrap().len(), 4);
        assert_eq!(json["data"]["broken_links"], 1);
        assert_eq!(json["data"]["renderer"], "pulldown");
        assert_eq!(json["data"]["skipped"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn build_skips_unreadable_notes() {
        let env = sample_vault();
        env.write_bytes("Legacy.md", &[0xFF, 0xFE, b'h', 0, b'i', 0]);

        env.cmd()
            .build(env.site_dir())
            .assert()
            .success()
            .stdout(predicate::str::contains("Built 3 page(s)"))
            .stdout(predicate::str::contains("skipped: Legacy.md"));
    }

    #[test]
    fn build_uses_config_file() {
        let env = sample_vault();
        env.write_config(&format!(
            "dir = {:?}\noutput = {:?}\nsite_title = \"Garden\"\ntheme = \"dark\"\n",
            env.vault_dir().display().to_string(),
            env.site_dir().display().to_string(),
        ));

        env.bare_cmd().args(["build"]).assert().success();

        assert!(env.read_site_file("index.html").contains("<h1>Garden</h1>"));
        assert!(env.read_site_file("style.css").contains("#1a1a1a"));
    }

    #[test]
    fn build_with_unknown_theme_fails() {
        let env = sample_vault();
        env.cmd()
            .build(env.site_dir())
            .args(["--theme", "neon"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown theme 'neon'"));
    }

    #[test]
    fn build_missing_vault_fails() {
        let env = TestEnv::new();
        env.bare_cmd()
            .dir(&env.vault_dir().join("absent"))
            .build(env.site_dir())
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load vault"));
    }

    #[test]
    fn verbose_build_logs_to_stderr() {
        let env = sample_vault();
        env.cmd()
            .args(["-v"])
            .build(env.site_dir())
            .assert()
            .success()
            .stderr(predicate::str::contains("site written to"));
    }
}

// ===========================================
// backlinks command tests
// ===========================================
mod backlinks_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn backlinks_human() {
        let env = sample_vault();
        env.cmd()
            .backlinks("home")
            .assert()
            .success()
            .stdout(predicate::str::contains("Log"))
            .stdout(predicate::str::contains("Projects"))
            .stdout(predicate::str::contains("2 backlink(s)"));
    }

    #[test]
    fn backlinks_json() {
        let env = sample_vault();
        let json: Value = env.cmd().backlinks("Home").format_json().output_json();

        let titles: Vec<&str> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Log", "Projects"]);
        assert_eq!(json["data"][0]["path"], "Daily/Log.md");
        assert_eq!(json["data"][0]["href"], "log.html");
    }

    #[test]
    fn backlinks_paths() {
        let env = sample_vault();
        let out = env.cmd().backlinks("Projects").format_paths().output_success();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("Home.md"));
    }

    #[test]
    fn backlinks_none() {
        let env = TestEnv::new();
        env.write_note("Alone.md", "no links");
        env.cmd()
            .backlinks("Alone")
            .assert()
            .success()
            .stdout(predicate::str::contains("No backlinks found."));
    }

    #[test]
    fn backlinks_unknown_note_fails() {
        let env = sample_vault();
        env.cmd()
            .backlinks("Missing")
            .assert()
            .failure()
            .stderr(predicate::str::contains("note not found: Missing"));
    }
}

// ===========================================
// check command tests
// ===========================================
mod check_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn check_clean_vault() {
        let env = sample_vault();
        env.cmd()
            .check()
            .assert()
            .success()
            .stdout(predicate::str::contains("All notes OK."));
    }

    #[test]
    fn check_reports_broken_and_malformed_links() {
        let env = sample_vault();
        env.write_note("Draft.md", "todo: [[Someday]] and [[|oops]]");

        env.cmd()
            .check()
            .assert()
            .failure()
            .stdout(predicate::str::contains("warning: Draft.md: broken link to 'Someday'"))
            .stdout(predicate::str::contains("malformed link '[[|oops]]'"))
            .stdout(predicate::str::contains("Found 2 issue(s): 0 error(s), 2 warning(s)"))
            .stderr(predicate::str::contains("check found 2 issue(s)"));
    }

    #[test]
    fn check_reports_slug_collisions_as_errors() {
        let env = TestEnv::new();
        env.write_note("a/Meeting Notes.md", "");
        env.write_note("b/meeting-notes.md", "");

        let out = env
            .cmd()
            .check()
            .format_json()
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        let json: Value = serde_json::from_slice(&out).unwrap();

        let issues = json["data"]["issues"].as_array().unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0]["kind"]["kind"], "slug_collision");
        assert_eq!(issues[0]["kind"]["slug"], "meeting-notes");
    }
}

// ===========================================
// completions command tests
// ===========================================
mod completions_tests {
    use super::*;

    #[test]
    fn completions_bash() {
        let env = TestEnv::new();
        env.bare_cmd()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("vaultsite"));
    }

    #[test]
    fn completions_unknown_shell_fails() {
        let env = TestEnv::new();
        env.bare_cmd()
            .args(["completions", "cmd.exe"])
            .assert()
            .failure();
    }
}
