//! Stylesheets written next to the generated pages.

use std::path::Path;

use anyhow::{Context, Result, bail};

/// Light stylesheet.
pub const THEME_DEFAULT: &str = r##"
body {
    font-family: system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    max-width: 800px;
    margin: 0 auto;
    padding: 2rem;
    color: #333;
}
h1 { border-bottom: 1px solid #eee; padding-bottom: 0.5rem; }
h1, h2, h3, h4, h5, h6 { margin-top: 1.5em; margin-bottom: 0.5em; }
a { color: #0066cc; text-decoration: none; }
a:hover { text-decoration: underline; }
.tag {
    display: inline-block;
    background: #eef;
    color: #335;
    padding: 0.1rem 0.45rem;
    border-radius: 3px;
    margin: 0 0.25rem;
    font-size: 0.85em;
}
.tag::before { content: "#"; opacity: 0.6; }
[id]:target { background: #fff8c5; }
pre {
    background: #f5f5f5;
    padding: 1rem;
    overflow-x: auto;
    border-radius: 4px;
}
code {
    font-family: 'SF Mono', Monaco, 'Cascadia Code', monospace;
    font-size: 0.9em;
}
:not(pre) > code {
    background: #f0f0f0;
    padding: 0.1rem 0.3rem;
    border-radius: 3px;
}
blockquote {
    border-left: 3px solid #ddd;
    margin-left: 0;
    padding-left: 1rem;
    color: #666;
}
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #ddd; padding: 0.5rem; text-align: left; }
th { background: #f5f5f5; }
img { max-width: 100%; height: auto; }
.backlinks { border-top: 1px solid #eee; margin-top: 2rem; padding-top: 1rem; font-size: 0.95em; }
.backlinks h2 { font-size: 1em; color: #666; margin-top: 0; }
.notes-list ul, .backlinks ul { padding-left: 1.2rem; }
footer { color: #888; font-size: 0.85em; margin-top: 2rem; }
"##;

/// Dark stylesheet.
pub const THEME_DARK: &str = r##"
body {
    font-family: system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    max-width: 800px;
    margin: 0 auto;
    padding: 2rem;
    background: #1a1a1a;
    color: #e0e0e0;
}
h1 { border-bottom: 1px solid #333; padding-bottom: 0.5rem; }
h1, h2, h3, h4, h5, h6 { margin-top: 1.5em; margin-bottom: 0.5em; }
a { color: #6af; text-decoration: none; }
a:hover { text-decoration: underline; }
.tag {
    display: inline-block;
    background: #333;
    color: #cde;
    padding: 0.1rem 0.45rem;
    border-radius: 3px;
    margin: 0 0.25rem;
    font-size: 0.85em;
}
.tag::before { content: "#"; opacity: 0.6; }
[id]:target { background: #3a3520; }
pre {
    background: #2a2a2a;
    padding: 1rem;
    overflow-x: auto;
    border-radius: 4px;
}
code {
    font-family: 'SF Mono', Monaco, 'Cascadia Code', monospace;
    font-size: 0.9em;
}
:not(pre) > code {
    background: #333;
    padding: 0.1rem 0.3rem;
    border-radius: 3px;
}
blockquote {
    border-left: 3px solid #444;
    margin-left: 0;
    padding-left: 1rem;
    color: #aaa;
}
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #444; padding: 0.5rem; text-align: left; }
th { background: #2a2a2a; }
img { max-width: 100%; height: auto; }
.backlinks { border-top: 1px solid #333; margin-top: 2rem; padding-top: 1rem; font-size: 0.95em; }
.backlinks h2 { font-size: 1em; color: #999; margin-top: 0; }
.notes-list ul, .backlinks ul { padding-left: 1.2rem; }
footer { color: #777; font-size: 0.85em; margin-top: 2rem; }
"##;

/// Returns the stylesheet for a theme name or CSS file path.
///
/// `None` and `"default"` select the light theme, `"dark"` the dark one.
/// Anything else is read as a path to a CSS file.
///
/// # Errors
///
/// Fails if the name is neither built in nor an existing file, or if the file
/// cannot be read.
pub fn get_theme_css(theme: Option<&str>) -> Result<String> {
    match theme {
        None | Some("default") => Ok(THEME_DEFAULT.to_string()),
        Some("dark") => Ok(THEME_DARK.to_string()),
        Some(other) => {
            let path = Path::new(other);
            if !path.is_file() {
                bail!(
                    "unknown theme '{}': use 'default', 'dark', or a path to a CSS file",
                    other
                );
            }
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read theme {}", path.display()))
        }
    }
}
